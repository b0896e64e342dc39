//! Repository behaviour against a real MySQL server.
//!
//! These need `DATABASE_URL` to point at a scratch database and are ignored by
//! default: `cargo test -p database -- --ignored`.

use chrono::{NaiveDate, Utc};
use core_types::{Comparison, Entity, ErrorKind, RoastLevel};
use database::{
    BeansRecord, BeansRepository, DbContext, MySqlBeansRepository, MySqlRoasterRepository,
    MySqlSheetRepository, MySqlShotRepository, RoasterRecord, RoasterRepository, SheetRecord,
    SheetRepository, ShotRecord, ShotRepository,
};
use sqlx::mysql::MySqlPool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

const MISSING_ID: u64 = u64::MAX - 1;

struct Repos {
    pool: MySqlPool,
    sheets: MySqlSheetRepository,
    roasters: MySqlRoasterRepository,
    beans: MySqlBeansRepository,
    shots: MySqlShotRepository,
}

async fn repos() -> Repos {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");
    let pool = MySqlPool::connect(&url).await.expect("connect to MySQL");
    sqlx::raw_sql(include_str!("../schema.sql"))
        .execute(&pool)
        .await
        .expect("apply schema");

    let ctx = DbContext::new(pool.clone(), Duration::from_secs(10));
    Repos {
        pool,
        sheets: MySqlSheetRepository::new(ctx.clone()),
        roasters: MySqlRoasterRepository::new(ctx.clone()),
        beans: MySqlBeansRepository::new(ctx.clone()),
        shots: MySqlShotRepository::new(ctx),
    }
}

/// Names are unique across runs because the tables are shared.
fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{n}", Utc::now().timestamp_micros())
}

fn beans_record(roaster_id: u64, name: &str) -> BeansRecord {
    BeansRecord {
        roaster_id,
        name: name.to_string(),
        roast_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        roast_level: RoastLevel::LightToMedium,
    }
}

fn shot_record(sheet_id: u64, beans_id: u64) -> ShotRecord {
    ShotRecord {
        sheet_id,
        beans_id,
        grind_setting: 11,
        quantity_in: 18.0,
        quantity_out: 38.0,
        shot_time: Duration::from_millis(29_000),
        water_temperature: 93.0,
        rating: 8.5,
        is_too_bitter: false,
        is_too_sour: true,
        comparison_with_previous: Comparison::Better,
        additional_notes: "slightly fast".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn sheet_create_then_get_by_id_returns_the_created_values() {
    let repos = repos().await;
    let name = unique("sheet");

    let id = repos.sheets.create(&SheetRecord { name: name.clone() }).await.unwrap();
    let sheet = repos.sheets.get_by_id(id).await.unwrap();

    assert_eq!(sheet.id, id);
    assert_eq!(sheet.name, name);
    assert_eq!(repos.sheets.get_by_name(&name).await.unwrap(), sheet);
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn roaster_and_beans_create_then_get_by_id_return_the_created_values() {
    let repos = repos().await;
    let name = unique("roaster");

    let roaster_id = repos.roasters.create(&RoasterRecord { name: name.clone() }).await.unwrap();
    let roaster = repos.roasters.get_by_id(roaster_id).await.unwrap();
    assert_eq!(roaster.id, roaster_id);
    assert_eq!(roaster.name, name);
    assert_eq!(repos.roasters.get_by_name(&name).await.unwrap(), roaster);

    let beans_id = repos.beans.create(&beans_record(roaster_id, "Three Africas")).await.unwrap();
    let beans = repos.beans.get_by_id(beans_id).await.unwrap();
    assert_eq!(beans.id, beans_id);
    assert_eq!(beans.name, "Three Africas");
    assert_eq!(beans.roaster_id, roaster_id);
    assert_eq!(beans.roast_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(beans.roast_level, RoastLevel::LightToMedium);
    assert_eq!(beans.roaster, roaster);
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn renaming_onto_an_existing_name_already_exists() {
    let repos = repos().await;
    let taken = unique("taken");
    let free = unique("free");

    repos.sheets.create(&SheetRecord { name: taken.clone() }).await.unwrap();
    let sheet_id = repos.sheets.create(&SheetRecord { name: free.clone() }).await.unwrap();
    let err = repos
        .sheets
        .update_by_id(sheet_id, &SheetRecord { name: taken.clone() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists(Entity::Sheet));
    assert_eq!(repos.sheets.get_by_id(sheet_id).await.unwrap().name, free);

    repos.roasters.create(&RoasterRecord { name: taken.clone() }).await.unwrap();
    let roaster_id = repos.roasters.create(&RoasterRecord { name: free.clone() }).await.unwrap();
    let err = repos
        .roasters
        .update_by_id(roaster_id, &RoasterRecord { name: taken })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists(Entity::Roaster));
    assert_eq!(repos.roasters.get_by_id(roaster_id).await.unwrap().name, free);
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn moving_a_shot_to_a_missing_sheet_names_the_sheet() {
    let repos = repos().await;
    let roaster_id = repos
        .roasters
        .create(&RoasterRecord { name: unique("roaster") })
        .await
        .unwrap();
    let beans_id = repos.beans.create(&beans_record(roaster_id, "Bella Donovan")).await.unwrap();
    let sheet_id = repos.sheets.create(&SheetRecord { name: unique("sheet") }).await.unwrap();
    let shot_id = repos.shots.create(&shot_record(sheet_id, beans_id)).await.unwrap();

    let err = repos
        .shots
        .update_by_id(shot_id, &shot_record(MISSING_ID, beans_id))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Sheet));
    assert_eq!(repos.shots.get_by_id(shot_id).await.unwrap().sheet.id, sheet_id);
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn duplicate_names_already_exist_and_are_not_persisted() {
    let repos = repos().await;
    let name = unique("dup");

    repos.sheets.create(&SheetRecord { name: name.clone() }).await.unwrap();
    let err = repos.sheets.create(&SheetRecord { name: name.clone() }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists(Entity::Sheet));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sheets WHERE name = ?")
        .bind(&name)
        .fetch_one(&repos.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    repos.roasters.create(&RoasterRecord { name: name.clone() }).await.unwrap();
    let err = repos.roasters.create(&RoasterRecord { name }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists(Entity::Roaster));
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn updating_a_missing_row_does_not_exist() {
    let repos = repos().await;
    let name = unique("ghost");

    let err = repos
        .sheets
        .update_by_id(MISSING_ID, &SheetRecord { name: name.clone() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Sheet));
    assert_eq!(
        repos.sheets.get_by_name(&name).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Sheet)
    );

    let err = repos
        .roasters
        .update_by_id(MISSING_ID, &RoasterRecord { name })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Roaster));

    let roaster_id = repos
        .roasters
        .create(&RoasterRecord { name: unique("roaster") })
        .await
        .unwrap();
    let err = repos
        .beans
        .update_by_id(MISSING_ID, &beans_record(roaster_id, "nothing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Beans));

    // Valid references, so only the missing shot row can fail the update.
    let beans_id = repos.beans.create(&beans_record(roaster_id, "something")).await.unwrap();
    let sheet_id = repos.sheets.create(&SheetRecord { name: unique("sheet") }).await.unwrap();
    let err = repos
        .shots
        .update_by_id(MISSING_ID, &shot_record(sheet_id, beans_id))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Shot));
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn deleting_a_missing_row_does_not_exist() {
    let repos = repos().await;

    assert_eq!(
        repos.sheets.delete_by_id(MISSING_ID).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Sheet)
    );
    assert_eq!(
        repos.roasters.delete_by_id(MISSING_ID).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Roaster)
    );
    assert_eq!(
        repos.beans.delete_by_id(MISSING_ID).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Beans)
    );
    assert_eq!(
        repos.shots.delete_by_id(MISSING_ID).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Shot)
    );
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn deleting_a_roaster_with_beans_is_a_foreign_key_constraint() {
    let repos = repos().await;
    let roaster_id = repos
        .roasters
        .create(&RoasterRecord { name: unique("roaster") })
        .await
        .unwrap();
    repos.beans.create(&beans_record(roaster_id, "Hayes Valley")).await.unwrap();

    let err = repos.roasters.delete_by_id(roaster_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ForeignKeyConstraint(Entity::Roaster));
    assert!(repos.roasters.get_by_id(roaster_id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn dangling_references_name_the_missing_parent() {
    let repos = repos().await;

    let err = repos.beans.create(&beans_record(MISSING_ID, "orphan")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Roaster));

    let sheet_id = repos.sheets.create(&SheetRecord { name: unique("sheet") }).await.unwrap();
    let err = repos.shots.create(&shot_record(sheet_id, MISSING_ID)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Beans));
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn shots_of_a_new_sheet_are_an_empty_list() {
    let repos = repos().await;
    let sheet_id = repos.sheets.create(&SheetRecord { name: unique("empty") }).await.unwrap();

    let shots = repos.shots.get_all_by_sheet(sheet_id).await.unwrap();
    assert!(shots.is_empty());
}

#[tokio::test]
#[ignore = "requires MySQL at DATABASE_URL"]
async fn shot_aggregate_reaches_the_roaster() {
    let repos = repos().await;
    let roaster_name = unique("BlueBottle");

    let roaster_id = repos
        .roasters
        .create(&RoasterRecord { name: roaster_name.clone() })
        .await
        .unwrap();
    let beans_id = repos.beans.create(&beans_record(roaster_id, "Giant Steps")).await.unwrap();
    let sheet_id = repos.sheets.create(&SheetRecord { name: unique("Morning") }).await.unwrap();
    let shot_id = repos.shots.create(&shot_record(sheet_id, beans_id)).await.unwrap();

    let shot = repos.shots.get_by_id(shot_id).await.unwrap();
    assert_eq!(shot.sheet.id, sheet_id);
    assert_eq!(shot.beans.name, "Giant Steps");
    assert_eq!(shot.beans.roaster.name, roaster_name);
    assert_eq!(shot.rating, 8.5);
    assert_eq!(shot.shot_time, Duration::from_millis(29_000));

    let mut changed = shot_record(sheet_id, beans_id);
    changed.rating = 6.0;
    repos.shots.update_by_id(shot_id, &changed).await.unwrap();
    let reread = repos.shots.get_by_id(shot_id).await.unwrap();
    assert_eq!(reread.rating, 6.0);
    assert_eq!(reread.created_at, shot.created_at);

    let listed = repos.shots.get_all_by_sheet(sheet_id).await.unwrap();
    assert_eq!(listed.len(), 1);

    repos.shots.delete_by_id(shot_id).await.unwrap();
    assert_eq!(
        repos.shots.get_by_id(shot_id).await.unwrap_err().kind(),
        ErrorKind::DoesNotExist(Entity::Shot)
    );
}
