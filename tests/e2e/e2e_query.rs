//! End-to-end lifecycle tests against real PostgreSQL binaries.
//!
//! Requires `initdb` and `postgres` to be installed (on PATH, via
//! `pg_config`, or through SEEDBED_PG_BINDIR).
//! Run with: cargo test --test e2e -- --ignored

use postgres::{Client, NoTls};
use seedbed::Postgres;

use crate::fixture::reset_template;

#[test]
#[ignore]
fn test_select_one_roundtrip() {
    reset_template();

    let mut pg = Postgres::start().expect("start postgres");

    let mut client = Client::connect(&pg.conninfo(), NoTls).expect("connect");
    let row = client.query_one("SELECT 1", &[]).expect("query");
    let n: i32 = row.get(0);
    assert_eq!(n, 1);
    drop(client);

    let dir = pg.workdir().to_path_buf();
    pg.stop().expect("stop postgres");
    assert!(!dir.exists(), "working directory survived stop");
}

#[test]
#[ignore]
fn test_second_start_reuses_the_template() {
    reset_template();

    let mut first = Postgres::start().expect("start");
    let runs = seedbed::init_runs();

    let mut second = Postgres::start().expect("start again");
    assert_eq!(seedbed::init_runs(), runs, "second start re-ran initdb");

    // Both instances are live and independently queryable.
    let mut a = Client::connect(&first.conninfo(), NoTls).expect("connect first");
    let mut b = Client::connect(&second.conninfo(), NoTls).expect("connect second");
    a.batch_execute("CREATE TABLE marker (id int)").expect("ddl on first");
    let missing = b.query("SELECT * FROM marker", &[]);
    assert!(missing.is_err(), "instances share state");
    drop(a);
    drop(b);

    first.stop().expect("stop first");
    second.stop().expect("stop second");
}
