use custrepo_core::db::ensure_schema;
use custrepo_core::{
    ConnectionProvider, CustomerRepository, CustomerService, DbConfig, NewCustomer,
    SqliteConnectionProvider, SqliteCustomerRepository,
};
use tempfile::TempDir;

fn setup() -> (TempDir, SqliteCustomerRepository<SqliteConnectionProvider>) {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("customers.db")).create_if_missing(true);
    let provider = SqliteConnectionProvider::new(config);
    ensure_schema(&provider.get_connection().unwrap()).unwrap();
    (dir, SqliteCustomerRepository::new(provider))
}

fn ann() -> NewCustomer {
    NewCustomer::new("Ann", "Kot", "ann@x.com")
}

#[test]
fn save_then_find_all_returns_single_matching_record() {
    let (_dir, repo) = setup();

    repo.save(&ann()).unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].contact(), ann());
    assert!(all[0].id > 0);
    assert!(!all[0].registration_date.is_empty());
}

#[test]
fn save_and_find_by_id_roundtrip() {
    let (_dir, repo) = setup();

    let id = repo.save(&ann()).unwrap();
    let loaded = repo.find_by_id(id).unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.first_name, "Ann");
    assert_eq!(loaded.last_name, "Kot");
    assert_eq!(loaded.email, "ann@x.com");
}

#[test]
fn save_assigns_distinct_increasing_ids() {
    let (_dir, repo) = setup();

    let first = repo.save(&ann()).unwrap();
    let second = repo
        .save(&NewCustomer::new("Bo", "Lin", "bo@x.com"))
        .unwrap();

    assert!(second > first);
    assert_eq!(repo.find_all().unwrap().len(), 2);
}

#[test]
fn find_by_id_for_missing_id_returns_none() {
    let (_dir, repo) = setup();
    repo.save(&ann()).unwrap();

    assert!(repo.find_by_id(9999).unwrap().is_none());
}

#[test]
fn find_all_on_empty_table_returns_empty_vec() {
    let (_dir, repo) = setup();
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn update_changes_contact_fields_only() {
    let (_dir, repo) = setup();
    let id = repo.save(&ann()).unwrap();
    let before = repo.find_by_id(id).unwrap().unwrap();

    assert!(repo
        .update(id, &NewCustomer::new("Anna", "Kotek", "anna@x.com"))
        .unwrap());

    let after = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.registration_date, before.registration_date);
    assert_eq!(after.contact(), NewCustomer::new("Anna", "Kotek", "anna@x.com"));
}

#[test]
fn update_leaves_other_rows_untouched() {
    let (_dir, repo) = setup();
    let target = repo.save(&ann()).unwrap();
    let other = repo
        .save(&NewCustomer::new("Bo", "Lin", "bo@x.com"))
        .unwrap();

    let mut contact = repo.find_by_id(target).unwrap().unwrap().contact();
    contact.email = "ann@y.com".to_string();
    repo.update(target, &contact).unwrap();

    let untouched = repo.find_by_id(other).unwrap().unwrap();
    assert_eq!(untouched.email, "bo@x.com");
}

#[test]
fn update_of_missing_id_is_a_silent_no_op() {
    let (_dir, repo) = setup();
    repo.save(&ann()).unwrap();

    let ghost = NewCustomer::new("Ghost", "User", "ghost@x.com");
    assert!(!repo.update(9999, &ghost).unwrap());

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].contact(), ann());
}

#[test]
fn delete_removes_exactly_one_row() {
    let (_dir, repo) = setup();
    let doomed = repo.save(&ann()).unwrap();
    let kept = repo
        .save(&NewCustomer::new("Bo", "Lin", "bo@x.com"))
        .unwrap();

    assert!(repo.delete(doomed).unwrap());

    assert!(repo.find_by_id(doomed).unwrap().is_none());
    let remaining = repo.find_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
}

#[test]
fn delete_of_missing_id_leaves_table_unchanged() {
    let (_dir, repo) = setup();
    repo.save(&ann()).unwrap();
    let before = repo.find_all().unwrap();

    assert!(!repo.delete(9999).unwrap());

    assert_eq!(repo.find_all().unwrap(), before);
}

#[test]
fn values_are_bound_not_interpolated() {
    let (_dir, repo) = setup();
    let hostile = NewCustomer::new("Robert'); DROP TABLE customers;--", "Tables", "bobby@x.com");

    let id = repo.save(&hostile).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.first_name, hostile.first_name);
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn repository_works_through_borrowed_provider() {
    let dir = tempfile::tempdir().unwrap();
    let provider =
        SqliteConnectionProvider::new(DbConfig::new(dir.path().join("c.db")).create_if_missing(true));
    ensure_schema(&provider.get_connection().unwrap()).unwrap();

    let repo = SqliteCustomerRepository::new(&provider);
    let id = repo.save(&ann()).unwrap();
    assert!(repo.find_by_id(id).unwrap().is_some());
}

#[test]
fn service_register_update_remove_flow() {
    let (_dir, repo) = setup();
    let service = CustomerService::new(repo);

    let id = service.register("Ann", "Kot", "ann@x.com").unwrap();
    assert!(service
        .change_contact(id, &NewCustomer::new("Ann", "Kot", "ann@kot.dev"))
        .unwrap());
    assert_eq!(service.get(id).unwrap().unwrap().email, "ann@kot.dev");

    assert!(service.remove(id).unwrap());
    assert!(!service.remove(id).unwrap());
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn provider_and_repository_can_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SqliteConnectionProvider>();
    assert_send_sync::<SqliteCustomerRepository<SqliteConnectionProvider>>();
}

#[test]
fn independent_calls_from_threads_each_see_committed_rows() {
    let (_dir, repo) = setup();
    let id = repo.save(&ann()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| repo.find_by_id(id).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap().email, "ann@x.com");
        }
    });
}

#[test]
fn rows_with_externally_assigned_ids_are_listed_as_stored() {
    let (dir, repo) = setup();
    let conn = rusqlite::Connection::open(dir.path().join("customers.db")).unwrap();
    conn.execute(
        "INSERT INTO customers (customer_id, first_name, last_name, email)
         VALUES (0, 'Zed', 'Zero', 'z@x.com');",
        [],
    )
    .unwrap();
    drop(conn);
    let normal = repo.save(&ann()).unwrap();

    let all = repo.find_all().unwrap();
    let ids: Vec<_> = all.iter().map(|customer| customer.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&0));
    assert!(ids.contains(&normal));
    assert_eq!(repo.find_by_id(0).unwrap().unwrap().first_name, "Zed");
}
