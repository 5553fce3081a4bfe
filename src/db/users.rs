use crate::models::User;
use bson::doc;
use mongodb::{Collection, Database};

/// Handle to the `users` collection.
#[derive(Clone)]
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> mongodb::error::Result<Option<User>> {
        self.collection.find_one(doc! { "email": email }).await
    }

    pub async fn insert(&self, user: &User) -> mongodb::error::Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }
}
