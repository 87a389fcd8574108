use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::entities::{guess_words, prelude::*};

#[derive(Clone)]
pub struct WordRepository {
    db: DatabaseConnection,
}

impl WordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn all(&self) -> Result<Vec<guess_words::Model>> {
        let words = GuessWords::find()
            .order_by_asc(guess_words::Column::Id)
            .all(&self.db)
            .await?;
        Ok(words)
    }

    /// Store a word unless it is already present. Returns true if inserted.
    pub async fn insert_if_absent(&self, word_text: &str) -> Result<bool> {
        let existing = GuessWords::find()
            .filter(guess_words::Column::WordText.eq(word_text))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        guess_words::ActiveModel {
            word_text: ActiveValue::Set(word_text.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(true)
    }

    /// Fill an empty table with `words`. An already populated table is left alone.
    pub async fn seed_if_empty(&self, words: &[String]) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for word in words {
            if self.insert_if_absent(word).await? {
                inserted += 1;
            }
        }

        tracing::info!("Seeded {} words into the vocabulary", inserted);
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = GuessWords::find().count(&self.db).await?;
        Ok(count)
    }
}
