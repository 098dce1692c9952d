pub const MIGRATIONS: &[&str] = &[V1, V2];

// language=sql
const V1: &str = r#"
    CREATE TABLE IF NOT EXISTS sensors (
        id TEXT NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        group_id TEXT NOT NULL DEFAULT '0', -- '0' means no group
        latitude REAL NOT NULL,
        longitude REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS measurements (
        sensor_id TEXT NOT NULL REFERENCES sensors ON UPDATE CASCADE ON DELETE CASCADE,
        timestamp INTEGER NOT NULL, -- unix time, milliseconds
        ph REAL NOT NULL,
        turbidity REAL NOT NULL,
        temperature REAL NOT NULL,
        conductivity REAL NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS measurements_sensor_id_timestamp
        ON measurements (sensor_id ASC, timestamp DESC);

    PRAGMA user_version = 1;
"#;

// language=sql
const V2: &str = r#"
    CREATE INDEX IF NOT EXISTS sensors_group_id ON sensors (group_id);
    PRAGMA user_version = 2;
"#;
