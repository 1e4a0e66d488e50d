//! Data access behaviour against an in-memory SQLite database.

mod common;

use bookings::contract::error::BookingsError;
use bookings::contract::model::{AppointmentPatch, BarberPatch, NewBarber, PersonName, ServiceName};
use std::sync::Arc;

use bookings::contract::model::{Appointment, Barber};
use bookings::domain::repo::BookingsRepository;
use bookings::domain::service::Service;
use bookings::infra::storage::SeaOrmBookingsRepository;
use bookings::Bookings;
use chrono::{TimeZone, Utc};
use common::{appointment, barber, new_appointment, setup, RecordingIdentity};
use sea_orm::Database;
use uuid::Uuid;

#[tokio::test]
async fn day_filter_is_inclusive_low_exclusive_high() {
    let env = setup().await;
    let b = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;

    let _before = appointment(&env.api, &b, "2024-02-29T23:59:59Z").await;
    let midnight = appointment(&env.api, &b, "2024-03-01T00:00:00Z").await;
    let last_second = appointment(&env.api, &b, "2024-03-01T23:59:59Z").await;
    let _next_day = appointment(&env.api, &b, "2024-03-02T00:00:00Z").await;

    let found = env
        .api
        .list_appointments(None, Some("2024-03-01"))
        .await
        .unwrap();
    let ids: Vec<Uuid> = found.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![midnight.id, last_second.id]);
}

#[tokio::test]
async fn appointments_filter_by_barber_and_sort_by_time() {
    let env = setup().await;
    let bob = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let ann = barber(&env.api, "ann@shop.test", "Ann", "Shears").await;

    let late = appointment(&env.api, &bob, "2024-03-01T15:00:00Z").await;
    let early = appointment(&env.api, &bob, "2024-03-01T09:00:00Z").await;
    let _other = appointment(&env.api, &ann, "2024-03-01T10:00:00Z").await;

    let bob_id = bob.id.to_string();
    let found = env.api.list_appointments(Some(&bob_id), None).await.unwrap();
    let ids: Vec<Uuid> = found.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    let all = env.api.list_appointments(None, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].time <= w[1].time));
}

#[tokio::test]
async fn malformed_filters_are_invalid_input() {
    let env = setup().await;
    assert!(matches!(
        env.api.list_appointments(None, Some("2024-3-1x")).await,
        Err(BookingsError::InvalidInput { .. })
    ));
    assert!(matches!(
        env.api.list_appointments(Some("not-a-uuid"), None).await,
        Err(BookingsError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn get_appointment_distinguishes_malformed_from_missing() {
    let env = setup().await;
    assert!(matches!(
        env.api.get_appointment("xyz").await,
        Err(BookingsError::InvalidInput { .. })
    ));
    let missing = Uuid::new_v4().to_string();
    assert_eq!(env.api.get_appointment(&missing).await.unwrap(), None);
}

#[tokio::test]
async fn create_appointment_with_unknown_barber_persists_nothing() {
    let env = setup().await;
    let ghost = Uuid::new_v4().to_string();

    let err = env
        .api
        .create_appointment(new_appointment(&ghost, "2024-03-01T10:00:00Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingsError::InvalidInput { .. }));
    assert!(env.api.list_appointments(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_appointment_rejects_bad_time() {
    let env = setup().await;
    let b = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let err = env
        .api
        .create_appointment(new_appointment(&b.id.to_string(), "next tuesday"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingsError::InvalidInput { .. }));
}

#[tokio::test]
async fn create_appointment_links_into_barber_ledger() {
    let env = setup().await;
    let b = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;

    let first = appointment(&env.api, &b, "2024-03-01T15:00:00Z").await;
    let second = appointment(&env.api, &b, "2024-03-01T09:00:00Z").await;
    assert_eq!(first.barber_id, b.id);

    let reloaded = env
        .api
        .get_barber(Some(&b.id.to_string()), None)
        .await
        .unwrap();
    // insertion order, not time order
    assert_eq!(reloaded.appointment_ids, vec![first.id, second.id]);

    let stored = env
        .api
        .get_appointment(&first.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, first);
}

#[tokio::test]
async fn get_barber_by_id_or_email() {
    let env = setup().await;
    let bob = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let ann = barber(&env.api, "ann@shop.test", "Ann", "Shears").await;

    let by_email = env.api.get_barber(None, Some("ann@shop.test")).await.unwrap();
    assert_eq!(by_email.id, ann.id);

    // id wins over email
    let both = env
        .api
        .get_barber(Some(&bob.id.to_string()), Some("ann@shop.test"))
        .await
        .unwrap();
    assert_eq!(both.id, bob.id);

    let missing = Uuid::new_v4().to_string();
    assert!(matches!(
        env.api.get_barber(Some(&missing), None).await,
        Err(BookingsError::NotFound { .. })
    ));
    assert!(matches!(
        env.api.get_barber(None, Some("nobody@shop.test")).await,
        Err(BookingsError::NotFound { .. })
    ));
    assert!(matches!(
        env.api.get_barber(None, None).await,
        Err(BookingsError::NotFound { .. })
    ));
    assert!(matches!(
        env.api.get_barber(Some("123"), None).await,
        Err(BookingsError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn barbers_free_at_exact_instant() {
    let env = setup().await;
    let busy = barber(&env.api, "busy@shop.test", "Busy", "Barber").await;
    let near = barber(&env.api, "near@shop.test", "Near", "Miss").await;
    let idle = barber(&env.api, "idle@shop.test", "Idle", "Barber").await;

    appointment(&env.api, &busy, "2024-03-01T10:00:00Z").await;
    appointment(&env.api, &near, "2024-03-01T10:00:00.001Z").await;

    let mut all: Vec<Uuid> = env
        .api
        .list_barbers(None)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    all.sort();
    let mut expected_all = vec![busy.id, near.id, idle.id];
    expected_all.sort();
    assert_eq!(all, expected_all);

    let mut free: Vec<Uuid> = env
        .api
        .list_barbers(Some("2024-03-01T12:00:00.000+02:00"))
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    free.sort();
    let mut expected_free = vec![near.id, idle.id];
    expected_free.sort();
    assert_eq!(free, expected_free);

    assert!(matches!(
        env.api.list_barbers(Some("2024-03-01")).await,
        Err(BookingsError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn update_appointment_merges_fields() {
    let env = setup().await;
    let bob = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let a = appointment(&env.api, &bob, "2024-03-01T10:00:00Z").await;
    let id = a.id.to_string();

    let updated = env
        .api
        .update_appointment(
            &id,
            AppointmentPatch {
                full_name: Some("Mary Ann Smith".into()),
                time: Some("2024-03-02T11:30:00Z".into()),
                service_name: Some(ServiceName::Combo),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, PersonName::new("Mary", "Ann Smith"));
    assert_eq!(updated.time.to_rfc3339(), "2024-03-02T11:30:00+00:00");
    assert_eq!(updated.service_name, ServiceName::Combo);
    assert_eq!(updated.email, a.email);
    assert_eq!(updated.duration, a.duration);

    let stored = env.api.get_appointment(&id).await.unwrap().unwrap();
    assert_eq!(stored, updated);

    assert!(matches!(
        env.api
            .update_appointment(&Uuid::new_v4().to_string(), AppointmentPatch::default())
            .await,
        Err(BookingsError::NotFound { .. })
    ));
    assert!(matches!(
        env.api
            .update_appointment(
                &id,
                AppointmentPatch {
                    time: Some("yesterday".into()),
                    ..Default::default()
                }
            )
            .await,
        Err(BookingsError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn update_barber_keeps_ledger() {
    let env = setup().await;
    let bob = barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let a = appointment(&env.api, &bob, "2024-03-01T10:00:00Z").await;

    let updated = env
        .api
        .update_barber(
            &bob.id.to_string(),
            BarberPatch {
                profile_image_url: Some("https://cdn.shop.test/bob.png".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, bob.name);
    assert_eq!(updated.profile_image_url.as_deref(), Some("https://cdn.shop.test/bob.png"));
    assert_eq!(updated.appointment_ids, vec![a.id]);

    let stored = env
        .api
        .get_barber(None, Some("bob@shop.test"))
        .await
        .unwrap();
    assert_eq!(stored, updated);

    assert!(matches!(
        env.api
            .update_barber(&Uuid::new_v4().to_string(), BarberPatch::default())
            .await,
        Err(BookingsError::NotFound { .. })
    ));
}

#[tokio::test]
async fn barber_emails_stay_unique() {
    let env = setup().await;
    barber(&env.api, "bob@shop.test", "Bob", "Cutter").await;
    let ann = barber(&env.api, "ann@shop.test", "Ann", "Shears").await;

    let dup = env
        .api
        .create_barber(NewBarber {
            email: "bob@shop.test".into(),
            name: None,
        })
        .await;
    assert!(matches!(dup, Err(BookingsError::InvalidInput { .. })));

    let steal = env
        .api
        .update_barber(
            &ann.id.to_string(),
            BarberPatch {
                email: Some("bob@shop.test".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(steal, Err(BookingsError::InvalidInput { .. })));
}

#[tokio::test]
async fn create_barber_stores_only_registration_fields() {
    let env = setup().await;
    let created = env
        .api
        .create_barber(NewBarber {
            email: "new@shop.test".into(),
            name: None,
        })
        .await
        .unwrap();
    assert_eq!(created.name, PersonName::default());
    assert_eq!(created.profile_image_url, None);
    assert!(created.appointment_ids.is_empty());
}

#[tokio::test]
async fn empty_arguments_count_as_absent() {
    let env = setup().await;
    let b = barber(&env.api, "e@shop.test", "Empty", "Args").await;
    appointment(&env.api, &b, "2024-03-01T10:00:00Z").await;

    let all = env.api.list_appointments(Some(""), Some("")).await.unwrap();
    assert_eq!(all.len(), 1);

    let barbers = env.api.list_barbers(Some("")).await.unwrap();
    assert_eq!(barbers.len(), 1);

    let by_email = env.api.get_barber(Some(""), Some("e@shop.test")).await.unwrap();
    assert_eq!(by_email.id, b.id);
    assert!(matches!(
        env.api.get_barber(Some(""), None).await,
        Err(BookingsError::NotFound { .. })
    ));
}

#[tokio::test]
async fn free_barbers_with_huge_reference_lists() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Bookings::migrate(&db).await.unwrap();
    let repo = Arc::new(SeaOrmBookingsRepository::new(db));

    let busy_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let real = Appointment {
        id: Uuid::new_v4(),
        duration: 30,
        email: "jane@customer.test".into(),
        name: PersonName::new("Jane", "Customer"),
        phone_number: "+1-555-0100".into(),
        service_name: ServiceName::Haircut,
        time: busy_at,
        barber_id: Uuid::new_v4(),
    };

    // 40 000 dangling references ahead of the one that resolves
    let mut ids: Vec<Uuid> = (0..40_000).map(|_| Uuid::new_v4()).collect();
    ids.push(real.id);
    let busy = Barber {
        id: real.barber_id,
        name: PersonName::new("Busy", "Barber"),
        email: "busy@shop.test".into(),
        profile_image_url: None,
        appointment_ids: ids,
    };
    let free = Barber {
        id: Uuid::new_v4(),
        name: PersonName::new("Free", "Barber"),
        email: "free@shop.test".into(),
        profile_image_url: None,
        appointment_ids: vec![],
    };
    repo.insert_barber(busy.clone()).await.unwrap();
    repo.insert_barber(free.clone()).await.unwrap();
    repo.insert_appointment(real.clone()).await.unwrap();

    let populated = repo.populate(vec![busy.clone()]).await.unwrap();
    assert_eq!(populated[0].appointments, vec![real]);

    let service = Service::new(repo, Arc::new(RecordingIdentity::default()));
    let available = service
        .list_barbers(Some("2024-03-01T10:00:00Z"))
        .await
        .unwrap();
    assert_eq!(available.iter().map(|b| b.id).collect::<Vec<_>>(), vec![free.id]);
}
