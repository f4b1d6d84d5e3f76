use school_core::db::open_db_in_memory;
use school_core::{
    Coordinate, MemorySchoolRepository, NewSchool, RepoError, SchoolRepository, SchoolService,
    SchoolValidationError, SqliteSchoolRepository,
};
use std::sync::Arc;

#[test]
fn add_then_list_nearest_end_to_end() {
    let repo = SqliteSchoolRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    let service = SchoolService::new(repo);

    service
        .add_school(&NewSchool::new("A", "X", 0.0, 0.0))
        .unwrap();
    let ranked = service.list_nearest(Coordinate::new(0.0, 1.0)).unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].item.name, "A");
    assert!((ranked[0].distance_km - 111.19).abs() < 0.01);
}

#[test]
fn list_nearest_orders_whole_snapshot() {
    let service = SchoolService::new(MemorySchoolRepository::new());
    for (name, longitude) in [("third", 3.0), ("first", 1.0), ("second", 2.0)] {
        service
            .add_school(&NewSchool::new(name, "addr", 0.0, longitude))
            .unwrap();
    }

    let names: Vec<String> = service
        .list_nearest(Coordinate::new(0.0, 0.0))
        .unwrap()
        .into_iter()
        .map(|entry| entry.item.name)
        .collect();
    assert_eq!(names, ["first", "second", "third"]);

    let stored: Vec<String> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|school| school.name)
        .collect();
    assert_eq!(stored, ["third", "first", "second"]);
}

#[test]
fn list_nearest_rejects_invalid_origin() {
    let service = SchoolService::new(MemorySchoolRepository::new());

    let err = service
        .list_nearest(Coordinate::new(0.0, 200.0))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(SchoolValidationError::OutOfRange {
            field: "longitude",
            ..
        })
    ));
}

#[test]
fn add_school_rejects_missing_address_without_persisting() {
    let repo = Arc::new(MemorySchoolRepository::new());
    let service = SchoolService::new(Arc::clone(&repo));

    let err = service
        .add_school(&NewSchool::new("Named", "", 0.0, 0.0))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(SchoolValidationError::MissingField("address"))
    ));
    assert!(repo.list_schools().unwrap().is_empty());
}

#[test]
fn service_accepts_shared_trait_object_store() {
    let repo: Arc<dyn SchoolRepository> = Arc::new(MemorySchoolRepository::new());
    let service = SchoolService::new(Arc::clone(&repo));

    let created = service
        .add_school(&NewSchool::new("Shared", "addr", 5.0, 5.0))
        .unwrap();

    assert_eq!(repo.list_schools().unwrap(), vec![created]);
}
