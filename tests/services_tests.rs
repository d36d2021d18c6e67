//! Domain service tests against the in-memory store
//!
//! Run with: cargo test --test services_tests -- --nocapture

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use yoga_studio::auth::{PasswordEncoder, UserDetailsService};
use yoga_studio::error::Error;
use yoga_studio::models::{Session, User};
use yoga_studio::services::{SessionService, TeacherService, UserService};
use yoga_studio::store::{Store, TeacherRepository, UserRepository, SEED_ADMIN_EMAIL};

struct Services {
    sessions: SessionService,
    teachers: TeacherService,
    users: UserService,
    details: UserDetailsService,
}

async fn seeded() -> Services {
    let store = Store::memory(true, &PasswordEncoder::new(4))
        .await
        .expect("Failed to seed store");

    Services {
        sessions: SessionService::new(store.sessions.clone(), store.users.clone()),
        teachers: TeacherService::new(store.teachers.clone()),
        users: UserService::new(store.users.clone()),
        details: UserDetailsService::new(store.users),
    }
}

fn class(name: &str) -> Session {
    let date = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
    Session::new(name, date, "Morning vinyasa flow", Some(1))
}

#[tokio::test]
async fn test_seeded_teachers() {
    let services = seeded().await;
    let teachers = services.teachers.find_all().await.unwrap();

    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0].last_name, "DELAHAYE");
    assert_eq!(teachers[1].first_name, "Hélène");
    println!("✓ Store seeded with two teachers");
}

#[tokio::test]
async fn test_load_principal_by_email() {
    let services = seeded().await;
    let principal = services
        .details
        .load_user_by_username(SEED_ADMIN_EMAIL)
        .await
        .unwrap();

    assert_eq!(principal.username, SEED_ADMIN_EMAIL);
    assert!(principal.authorities().is_empty());
    assert!(principal.is_account_non_expired());
    assert!(principal.is_account_non_locked());
    assert!(principal.is_credentials_non_expired());
    assert!(principal.is_enabled());
    println!("✓ Principal loaded with empty authorities and open account flags");
}

#[tokio::test]
async fn test_load_unknown_principal() {
    let services = seeded().await;
    let err = services
        .details
        .load_user_by_username("nobody@studio.com")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UsernameNotFound(_)));
    println!("✓ Unknown email reported as UsernameNotFound");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let services = seeded().await;

    let created = services.sessions.create(class("Flow")).await.unwrap();
    let id = created.id.unwrap();
    assert!(created.created_at.is_some());

    let mut changed = class("Flow (full)");
    changed.teacher_id = Some(2);
    let updated = services.sessions.update(id, changed).await.unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.teacher_id, Some(2));
    assert_eq!(updated.created_at, created.created_at);

    services.sessions.delete(id).await.unwrap();
    assert!(services.sessions.get_by_id(id).await.unwrap().is_none());
    println!("✓ Session created, updated and deleted");
}

#[tokio::test]
async fn test_participation_toggle() {
    let services = seeded().await;
    let session_id = services.sessions.create(class("Flow")).await.unwrap().id.unwrap();
    let user_id = services
        .users
        .create(User::new("toto@toto.com", "toto", "toto", "hash", false))
        .await
        .unwrap()
        .id
        .unwrap();

    services.sessions.participate(session_id, user_id).await.unwrap();
    assert!(matches!(
        services.sessions.participate(session_id, user_id).await,
        Err(Error::BadRequest(_))
    ));

    services
        .sessions
        .no_longer_participate(session_id, user_id)
        .await
        .unwrap();
    assert!(matches!(
        services.sessions.no_longer_participate(session_id, user_id).await,
        Err(Error::BadRequest(_))
    ));
    assert!(matches!(
        services.sessions.no_longer_participate(999, user_id).await,
        Err(Error::NotFound(_))
    ));
    println!("✓ Participation toggles with the expected errors");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_participation_keeps_every_join() {
    let services = seeded().await;
    let session_id = services.sessions.create(class("Flow")).await.unwrap().id.unwrap();

    let mut user_ids = vec![];
    for i in 0..50 {
        let user = services
            .users
            .create(User::new(&format!("yogi{}@studio.com", i), "Yogi", "Yogi", "hash", false))
            .await
            .unwrap();
        user_ids.push(user.id.unwrap());
    }

    let mut handles = vec![];
    for user_id in user_ids.clone() {
        let sessions = services.sessions.clone();
        handles.push(tokio::spawn(async move {
            sessions.participate(session_id, user_id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let session = services.sessions.get_by_id(session_id).await.unwrap().unwrap();
    assert_eq!(session.users.len(), user_ids.len());
    println!("✓ 50 concurrent joins all persisted");
}

#[tokio::test]
async fn test_deleted_user_leaves_sessions() {
    let services = seeded().await;
    let session_id = services.sessions.create(class("Flow")).await.unwrap().id.unwrap();
    let user_id = services
        .users
        .create(User::new("toto@toto.com", "toto", "toto", "hash", false))
        .await
        .unwrap()
        .id
        .unwrap();

    services.sessions.participate(session_id, user_id).await.unwrap();
    services.users.delete(user_id).await.unwrap();

    let session = services.sessions.get_by_id(session_id).await.unwrap().unwrap();
    assert!(session.users.is_empty());
    println!("✓ Deleting a user removes it from sessions");
}

#[tokio::test]
async fn test_shared_store_handles() {
    let store = Store::memory(false, &PasswordEncoder::new(4)).await.unwrap();
    let users = UserService::new(Arc::clone(&store.users));

    users
        .create(User::new("toto@toto.com", "toto", "toto", "hash", false))
        .await
        .unwrap();

    assert!(store.users.exists_by_email("toto@toto.com").await.unwrap());
    assert!(store.teachers.find_all().await.unwrap().is_empty());
    println!("✓ Unseeded store starts empty and shares state across handles");
}
