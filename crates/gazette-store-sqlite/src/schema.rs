//! SQL schema for the Gazette SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS topics (
    slug        TEXT PRIMARY KEY,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    username   TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    avatar_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    article_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    topic           TEXT NOT NULL REFERENCES topics(slug),
    author          TEXT NOT NULL REFERENCES users(username),
    body            TEXT NOT NULL,
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC, millisecond precision
    votes           INTEGER NOT NULL DEFAULT 0,
    article_img_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
    author     TEXT NOT NULL REFERENCES users(username),
    body       TEXT NOT NULL,
    votes      INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS articles_topic_idx   ON articles(topic);
CREATE INDEX IF NOT EXISTS comments_article_idx ON comments(article_id);

PRAGMA user_version = 1;
";

/// Empties every table, children first, and restarts id generation.
pub const WIPE: &str = "
DELETE FROM comments;
DELETE FROM articles;
DELETE FROM users;
DELETE FROM topics;
DELETE FROM sqlite_sequence;
";
