//! Resetting a store to a known dataset.

use gazette_core::{article::DEFAULT_ARTICLE_IMG_URL, seed::SeedData};

use crate::{
  Result, SqliteStore,
  encode::encode_dt,
  schema::WIPE,
};

impl SqliteStore {
  /// Replace the entire contents of the store with `data`.
  ///
  /// Runs in a single transaction: on any failure the previous contents are
  /// left untouched. Articles get ids `1..=n` in the order given.
  pub async fn seed(&self, data: SeedData) -> Result<()> {
    let SeedData { topics, users, articles, comments } = data;
    let counts = (topics.len(), users.len(), articles.len(), comments.len());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(WIPE)?;

        {
          let mut stmt =
            tx.prepare("INSERT INTO topics (slug, description) VALUES (?1, ?2)")?;
          for t in &topics {
            stmt.execute(rusqlite::params![t.slug, t.description])?;
          }

          let mut stmt = tx
            .prepare("INSERT INTO users (username, name, avatar_url) VALUES (?1, ?2, ?3)")?;
          for u in &users {
            stmt.execute(rusqlite::params![u.username, u.name, u.avatar_url])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO articles (
               article_id, title, topic, author, body, created_at, votes, article_img_url
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          )?;
          for (i, a) in articles.iter().enumerate() {
            let img = a.article_img_url.as_deref().unwrap_or(DEFAULT_ARTICLE_IMG_URL);
            stmt.execute(rusqlite::params![
              i as i64 + 1,
              a.title,
              a.topic,
              a.author,
              a.body,
              encode_dt(a.created_at),
              a.votes,
              img,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO comments (article_id, author, body, votes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for c in &comments {
            stmt.execute(rusqlite::params![
              c.article_id.get(),
              c.author,
              c.body,
              c.votes,
              encode_dt(c.created_at),
            ])?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(
      topics = counts.0,
      users = counts.1,
      articles = counts.2,
      comments = counts.3,
      "seeded store"
    );
    Ok(())
  }
}
