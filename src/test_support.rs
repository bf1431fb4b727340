//! Fixtures shared by the module tests: voter builders and an in-memory register.

use crate::search::engine::VoterDirectory;
use crate::search::ranking::MatchOptions;
use crate::search::types::VoterRecord;
use crate::wards::ward_name;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const CREATE_VOTERS: &str = "CREATE TABLE voters (
    id INTEGER PRIMARY KEY,
    serial INTEGER NOT NULL,
    name_en TEXT NOT NULL,
    name_ml TEXT NOT NULL,
    guardian_en TEXT NOT NULL,
    guardian_ml TEXT NOT NULL,
    house_no TEXT NOT NULL,
    house_name_en TEXT NOT NULL,
    house_name_ml TEXT NOT NULL,
    gender TEXT NOT NULL,
    age INTEGER NOT NULL,
    voter_id TEXT NOT NULL UNIQUE,
    ward TEXT NOT NULL,
    ward_name TEXT NOT NULL,
    polling_station TEXT NOT NULL,
    district TEXT NOT NULL,
    local_body TEXT NOT NULL
)";

pub fn voter(id: i64, name_en: &str, voter_id: &str, ward: &str) -> VoterRecord {
    VoterRecord {
        id,
        serial: id,
        name_en: name_en.to_string(),
        name_ml: String::new(),
        guardian_en: String::new(),
        guardian_ml: String::new(),
        house_no: format!("{}/{}", ward, id),
        house_name_en: String::new(),
        house_name_ml: String::new(),
        gender: "M".to_string(),
        age: 30 + id % 40,
        voter_id: voter_id.to_string(),
        ward: ward.to_string(),
        ward_name: ward_name(ward).unwrap_or_default().to_string(),
        polling_station: "Govt. LP School".to_string(),
        district: "Kollam".to_string(),
        local_body: "Kollam Corporation".to_string(),
    }
}

/// Single-connection in-memory database; the connection is never recycled so the data survives.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

pub async fn seeded_pool(records: &[VoterRecord]) -> SqlitePool {
    let pool = memory_pool().await;
    sqlx::query(CREATE_VOTERS)
        .execute(&pool)
        .await
        .expect("create voters table");

    for r in records {
        sqlx::query(
            "INSERT INTO voters (id, serial, name_en, name_ml, guardian_en, guardian_ml, house_no, \
             house_name_en, house_name_ml, gender, age, voter_id, ward, ward_name, polling_station, \
             district, local_body) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(r.id)
        .bind(r.serial)
        .bind(&r.name_en)
        .bind(&r.name_ml)
        .bind(&r.guardian_en)
        .bind(&r.guardian_ml)
        .bind(&r.house_no)
        .bind(&r.house_name_en)
        .bind(&r.house_name_ml)
        .bind(&r.gender)
        .bind(r.age)
        .bind(&r.voter_id)
        .bind(&r.ward)
        .bind(&r.ward_name)
        .bind(&r.polling_station)
        .bind(&r.district)
        .bind(&r.local_body)
        .execute(&pool)
        .await
        .expect("insert voter");
    }

    pool
}

pub async fn seeded_directory(records: &[VoterRecord], options: MatchOptions) -> VoterDirectory {
    VoterDirectory::from_pool(seeded_pool(records).await, options)
}
