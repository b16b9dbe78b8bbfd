/// Schema batch run on every open. `IF NOT EXISTS` keeps reopening cheap.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS applicants (
    email      TEXT PRIMARY KEY,
    password   TEXT NOT NULL,
    submitted  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS submissions (
    email        TEXT PRIMARY KEY REFERENCES applicants (email),
    answers      TEXT NOT NULL,
    submitted_at TEXT NOT NULL
);
";
