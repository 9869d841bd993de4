//! Integration tests for exceptional-core services
//!
//! These tests drive the auth and day-off services end to end against the
//! in-memory demo server. Session and settings persistence use real files
//! in a temp directory; only the network is replaced.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use chrono::NaiveDate;
use tempfile::TempDir;

use exceptional_core::{DayOffStatus, Error, ExceptionalContext, User};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a context in demo mode rooted at the given temp directory
fn demo_context(temp_dir: &TempDir) -> ExceptionalContext {
    let settings = temp_dir.path().join("settings.json");
    if !settings.exists() {
        std::fs::write(&settings, r#"{"demoMode": true}"#).unwrap();
    }
    ExceptionalContext::new(temp_dir.path()).expect("Failed to create context")
}

async fn login(ctx: &ExceptionalContext, email: &str) -> User {
    ctx.auth_service
        .login(email, "password")
        .await
        .expect("Failed to log in")
}

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_across_restarts() {
    let temp_dir = TempDir::new().unwrap();

    let ctx = demo_context(&temp_dir);
    assert!(!ctx.session.is_authenticated());
    let user = login(&ctx, "dev@example.com").await;
    assert_eq!(user.name, "John Doe");
    drop(ctx);

    // A new context over the same directory restores the session
    let restarted = demo_context(&temp_dir);
    assert!(restarted.session.is_authenticated());
    let restored = restarted.auth_service.current_user().unwrap();
    assert_eq!(restored.email, "dev@example.com");

    // And the restored identity works against the server
    let day_offs = restarted.day_off_service.load_mine().await.unwrap();
    assert_eq!(day_offs.len(), 2);
}

#[tokio::test]
async fn test_restored_identity_carries_the_superuser_flag() {
    let temp_dir = TempDir::new().unwrap();

    let ctx = demo_context(&temp_dir);
    login(&ctx, "admin@example.com").await;
    drop(ctx);

    let restarted = demo_context(&temp_dir);
    let restored = restarted.auth_service.current_user().unwrap();
    assert!(restored.super_user, "routing flag must survive a restart");
}

#[tokio::test]
async fn test_logout_forgets_the_session() {
    let temp_dir = TempDir::new().unwrap();

    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.auth_service.logout().unwrap();
    assert!(!ctx.session.is_authenticated());

    // Logging out twice is fine
    ctx.auth_service.logout().unwrap();

    let restarted = demo_context(&temp_dir);
    assert!(!restarted.session.is_authenticated());
}

// ============================================================================
// Personal Day-Off Flow
// ============================================================================

#[tokio::test]
async fn test_personal_request_flow_updates_list_and_allowance() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;

    // Seeded with one approved and one pending request
    let day_offs = ctx.day_off_service.load_mine().await.unwrap();
    assert_eq!(day_offs.len(), 2);
    assert_eq!(ctx.day_off_service.remaining(), 7);

    let created = ctx.day_off_service.request_date(day(4, 18)).await.unwrap();
    assert_eq!(created.status, DayOffStatus::Pending);
    assert_eq!(created.user_id, "1");

    let day_offs = ctx.day_off_service.day_offs();
    assert_eq!(day_offs.len(), 3);
    assert_eq!(ctx.day_off_service.remaining(), 6);

    // The list stays in calendar order
    let dates: Vec<NaiveDate> = day_offs.iter().map(|d| d.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_occupied_date_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();

    // 2024-04-15 is already approved in the seed data
    let err = ctx
        .day_off_service
        .request_date(day(4, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(ctx.day_off_service.day_offs().len(), 2, "nothing was added");
}

#[tokio::test]
async fn test_allowance_exhaustion_blocks_the_tenth_request() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();

    // Two seeded requests; seven more reach the quota of nine
    for n in 1..=7 {
        ctx.day_off_service.request_date(day(5, n)).await.unwrap();
    }
    assert_eq!(ctx.day_off_service.remaining(), 0);

    let err = ctx
        .day_off_service
        .request_date(day(5, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::QuotaExceeded { max: 9 }));
}

#[tokio::test]
async fn test_cancel_confirms_before_forgetting() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();

    // Cancelling the pending seed request works once
    ctx.day_off_service.cancel("2").await.unwrap();
    assert_eq!(ctx.day_off_service.day_offs().len(), 1);
    assert_eq!(ctx.day_off_service.remaining(), 8);

    // A second cancel is refused by the server and changes nothing
    let err = ctx.day_off_service.cancel("2").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(ctx.day_off_service.day_offs().len(), 1);
    assert!(!ctx.day_off_service.is_in_flight("2"));
}

#[tokio::test]
async fn test_cancelled_date_can_be_requested_again() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();

    ctx.day_off_service.cancel("2").await.unwrap();
    let created = ctx.day_off_service.request_date(day(4, 16)).await.unwrap();
    assert_eq!(created.date, day(4, 16));
}

// ============================================================================
// Admin Review Flow
// ============================================================================

#[tokio::test]
async fn test_admin_reviews_and_decides_for_another_user() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "admin@example.com").await;

    let users = ctx.day_off_service.users().await.unwrap();
    assert!(users.iter().any(|u| u.id == "1"));

    let day_offs = ctx.day_off_service.load_for_user("1").await.unwrap();
    assert_eq!(day_offs.len(), 2);
    assert_eq!(ctx.day_off_service.remaining(), 7);

    ctx.day_off_service.approve("2").await.unwrap();
    let list = ctx.day_off_service.day_offs();
    let decided = list.iter().find(|d| d.id == "2").unwrap();
    assert_eq!(decided.status, DayOffStatus::Approved);
    assert_eq!(
        ctx.day_off_service.remaining(),
        7,
        "approving a pending request keeps it counted"
    );
}

#[tokio::test]
async fn test_decisions_are_one_shot() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "admin@example.com").await;
    ctx.day_off_service.load_for_user("1").await.unwrap();

    ctx.day_off_service.approve("2").await.unwrap();
    let err = ctx.day_off_service.refuse("2").await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // The failed refuse did not clobber the approval
    let list = ctx.day_off_service.day_offs();
    let entry = list.iter().find(|d| d.id == "2").unwrap();
    assert_eq!(entry.status, DayOffStatus::Approved);
}

#[tokio::test]
async fn test_refused_requests_return_allowance() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "admin@example.com").await;
    ctx.day_off_service.load_for_user("1").await.unwrap();

    assert_eq!(ctx.day_off_service.remaining(), 7);
    ctx.day_off_service.refuse("2").await.unwrap();
    assert_eq!(ctx.day_off_service.remaining(), 8);
}

#[tokio::test]
async fn test_only_admins_remove_approved_requests() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();

    // The owner cannot delete their approved request
    let err = ctx.day_off_service.cancel("1").await.unwrap_err();
    assert!(matches!(err, Error::Authorization(_)));
    assert_eq!(ctx.day_off_service.day_offs().len(), 2);

    login(&ctx, "admin@example.com").await;
    ctx.day_off_service.load_for_user("1").await.unwrap();
    ctx.day_off_service.cancel("1").await.unwrap();
    assert!(ctx.day_off_service.day_offs().iter().all(|d| d.id != "1"));
}

#[tokio::test]
async fn test_regular_users_cannot_use_admin_surfaces() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;

    let err = ctx.day_off_service.users().await.unwrap_err();
    assert!(matches!(err, Error::Authorization(_)));

    let err = ctx.day_off_service.load_for_user("2").await.unwrap_err();
    assert!(matches!(err, Error::Authorization(_)));

    ctx.day_off_service.load_mine().await.unwrap();
    let err = ctx.day_off_service.approve("2").await.unwrap_err();
    assert!(matches!(err, Error::Authorization(_)));
}

// ============================================================================
// Demo Mode Semantics
// ============================================================================

#[tokio::test]
async fn test_demo_state_does_not_survive_a_restart() {
    let temp_dir = TempDir::new().unwrap();

    let ctx = demo_context(&temp_dir);
    login(&ctx, "dev@example.com").await;
    ctx.day_off_service.load_mine().await.unwrap();
    ctx.day_off_service.cancel("2").await.unwrap();
    assert_eq!(ctx.day_off_service.day_offs().len(), 1);
    drop(ctx);

    // Demo data is in-memory only; a new context re-seeds it
    let restarted = demo_context(&temp_dir);
    let day_offs = restarted.day_off_service.load_mine().await.unwrap();
    assert_eq!(day_offs.len(), 2);
}
