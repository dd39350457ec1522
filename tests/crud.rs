mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use taskhub_data::models::{Project, ProjectStatus, Task, TaskPatch, TaskStatus};
use taskhub_data::store::MemoryDatastore;
use taskhub_data::DataError;
use uuid::Uuid;

#[tokio::test]
async fn create_then_get_by_id_round_trips() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    let owner = Uuid::new_v4();
    let created = services
        .projects
        .records()
        .create(&Project::new("Website", owner, None, None, Some("relaunch".to_string())))
        .await
        .unwrap();

    let id = created.id.expect("store assigns an id on create");
    let loaded = services.projects.records().get_by_id(id).await.unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.name, "Website");
    assert_eq!(loaded.owner_id, owner);
    assert_eq!(loaded.description.as_deref(), Some("relaunch"));
    assert_eq!(loaded.status, ProjectStatus::NotStarted);
}

#[tokio::test]
async fn get_by_id_on_zero_rows_is_not_found() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    let missing = Uuid::new_v4();
    let err = services.projects.records().get_by_id(missing).await.unwrap_err();
    match err {
        DataError::NotFound { collection, id } => {
            assert_eq!(collection, "projects");
            assert_eq!(id, missing);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_ids_still_resolve_to_one_record() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    // A corrupted collection where two records share an id. The read must
    // still come back with a single record, not fail or return both.
    let shared = Uuid::new_v4();
    let mut first = Project::new("Original", Uuid::new_v4(), None, None, None);
    first.id = Some(shared);
    let mut second = Project::new("Impostor", Uuid::new_v4(), None, None, None);
    second.id = Some(shared);
    services.projects.records().create(&first).await.unwrap();
    services.projects.records().create(&second).await.unwrap();

    let loaded = services.projects.records().get_by_id(shared).await.unwrap();
    assert_eq!(loaded.id, Some(shared));
    assert_eq!(loaded.name, "Original");
}

#[tokio::test]
async fn get_all_on_empty_collection_is_empty_not_an_error() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);
    assert!(services.comments.records().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn partial_update_touches_only_supplied_fields() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    let project_id = Uuid::new_v4();
    let start = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
    let created = services
        .tasks
        .records()
        .create(&Task::new(
            "Write docs",
            project_id,
            start,
            None,
            Some("user guide".to_string()),
            vec![Uuid::new_v4()],
            None,
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let patch = TaskPatch {
        status: Some(TaskStatus::Done),
        ..Default::default()
    };
    let updated = services.tasks.records().update(&patch, id).await.unwrap();

    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.name, "Write docs");
    assert_eq!(updated.description.as_deref(), Some("user guide"));
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.assignees_ids, created.assignees_ids);
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    let patch = TaskPatch {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    let err = services
        .tasks
        .records()
        .update(&patch, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let store = Arc::new(MemoryDatastore::new());
    let services = common::services(store);

    let created = services
        .projects
        .records()
        .create(&Project::new("Throwaway", Uuid::new_v4(), None, None, None))
        .await
        .unwrap();
    let id = created.id.unwrap();

    services.projects.records().delete(id).await.unwrap();
    assert!(services.projects.records().get_all().await.unwrap().is_empty());
    assert!(matches!(
        services.projects.records().get_by_id(id).await,
        Err(DataError::NotFound { .. })
    ));
}

#[tokio::test]
async fn backend_failure_surfaces_immediately() {
    let store = Arc::new(MemoryDatastore::new());
    store.fail_collection("projects", "connection reset");
    let services = common::services(store);

    let err = services.projects.records().get_all().await.unwrap_err();
    assert!(matches!(err, DataError::Backend(_)));
    assert!(err.to_string().contains("connection reset"));
}
