use sqlx::SqlitePool;

use crate::models::entities::{
    Favorite, FavoriteTarget, NewPerson, NewPlanet, NewUser, People, Planet, User,
};

/// Injected persistence handle. Cheap to clone; every handler reaches the
/// database through this type, which keeps the store swappable in tests.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    pub fn new(pool: SqlitePool) -> Self {
        Db { pool }
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // --- users ---

    pub async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, user_name, email, password, is_active FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, user_name, email, password, is_active FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert_user(&self, new: NewUser) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (user_name, email, password, is_active) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.user_name)
        .bind(&new.email)
        .bind(&new.password)
        .bind(new.is_active)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            user_name: new.user_name,
            email: new.email,
            password: new.password,
            is_active: new.is_active,
        })
    }

    pub async fn update_user(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET user_name = ?, email = ?, password = ?, is_active = ? WHERE id = ?",
        )
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_active)
        .bind(user.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a user. The user's favorites go with it (`ON DELETE CASCADE`).
    pub async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- people ---

    pub async fn list_people(&self) -> Result<Vec<People>, sqlx::Error> {
        sqlx::query_as::<_, People>(
            "SELECT id, name, gender, height, mass, planet_id, url FROM people ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_person(&self, id: i64) -> Result<Option<People>, sqlx::Error> {
        sqlx::query_as::<_, People>(
            "SELECT id, name, gender, height, mass, planet_id, url FROM people WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert_person(&self, new: NewPerson) -> Result<People, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO people (name, gender, height, mass, planet_id, url) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(new.gender)
        .bind(new.height)
        .bind(new.mass)
        .bind(new.planet_id)
        .bind(new.url.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(People {
            id: result.last_insert_rowid(),
            name: new.name,
            gender: new.gender,
            height: new.height,
            mass: new.mass,
            planet_id: new.planet_id,
            url: new.url,
        })
    }

    pub async fn update_person(&self, person: &People) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE people SET name = ?, gender = ?, height = ?, mass = ?, planet_id = ?, url = ? WHERE id = ?",
        )
        .bind(&person.name)
        .bind(person.gender)
        .bind(person.height)
        .bind(person.mass)
        .bind(person.planet_id)
        .bind(person.url.as_deref())
        .bind(person.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a person together with every favorite pointing at it, in one
    /// transaction.
    pub async fn delete_person(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM favorite_items WHERE kind = 'people' AND target_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // --- planets ---

    pub async fn list_planets(&self) -> Result<Vec<Planet>, sqlx::Error> {
        sqlx::query_as::<_, Planet>(
            "SELECT id, name, diameter, climate, population, terrain, url FROM planets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_planet(&self, id: i64) -> Result<Option<Planet>, sqlx::Error> {
        sqlx::query_as::<_, Planet>(
            "SELECT id, name, diameter, climate, population, terrain, url FROM planets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert_planet(&self, new: NewPlanet) -> Result<Planet, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO planets (name, diameter, climate, population, terrain, url) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(new.diameter)
        .bind(new.climate.as_deref())
        .bind(new.population)
        .bind(new.terrain.as_deref())
        .bind(new.url.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(Planet {
            id: result.last_insert_rowid(),
            name: new.name,
            diameter: new.diameter,
            climate: new.climate,
            population: new.population,
            terrain: new.terrain,
            url: new.url,
        })
    }

    pub async fn update_planet(&self, planet: &Planet) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE planets SET name = ?, diameter = ?, climate = ?, population = ?, terrain = ?, url = ? WHERE id = ?",
        )
        .bind(&planet.name)
        .bind(planet.diameter)
        .bind(planet.climate.as_deref())
        .bind(planet.population)
        .bind(planet.terrain.as_deref())
        .bind(planet.url.as_deref())
        .bind(planet.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a planet together with every favorite pointing at it, in one
    /// transaction. Inhabitants keep their row; their `planet_id` is nulled
    /// by the schema's `ON DELETE SET NULL`.
    pub async fn delete_planet(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM favorite_items WHERE kind = 'planet' AND target_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM planets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // --- favorites ---

    /// Insert a favorite. No existence check here: the unique index on
    /// (user_id, kind, target_id) rejects duplicates, and the caller maps
    /// that violation to the duplicate response.
    pub async fn insert_favorite(
        &self,
        user_id: i64,
        target: FavoriteTarget,
    ) -> Result<Favorite, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO favorite_items (user_id, kind, target_id) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(target.kind())
                .bind(target.target_id())
                .execute(&self.pool)
                .await?;

        Ok(Favorite {
            id: result.last_insert_rowid(),
            user_id,
            target,
        })
    }

    pub async fn delete_favorite(
        &self,
        user_id: i64,
        target: FavoriteTarget,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM favorite_items WHERE user_id = ? AND kind = ? AND target_id = ?")
                .bind(user_id)
                .bind(target.kind())
                .bind(target.target_id())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_favorites_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, kind, target_id FROM favorite_items WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db_pool, is_unique_violation};
    use crate::models::entities::Gender;

    async fn test_db() -> Db {
        let pool = init_db_pool("sqlite::memory:").await.unwrap();
        Db::new(pool)
    }

    fn sample_user(n: u32) -> NewUser {
        NewUser {
            user_name: format!("user{}", n),
            email: format!("user{}@example.com", n),
            password: "secret".to_string(),
            is_active: true,
        }
    }

    fn sample_person(name: &str, planet_id: Option<i64>) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            gender: Some(Gender::Male),
            height: Some(172),
            mass: Some(77),
            planet_id,
            url: None,
        }
    }

    fn sample_planet(name: &str) -> NewPlanet {
        NewPlanet {
            name: name.to_string(),
            diameter: Some(10465),
            climate: Some("arid".to_string()),
            population: Some(200000),
            terrain: Some("desert".to_string()),
            url: None,
        }
    }

    #[tokio::test]
    async fn insert_and_fetch_round_trip() {
        let db = test_db().await;

        let planet = db.insert_planet(sample_planet("Tatooine")).await.unwrap();
        let person = db
            .insert_person(sample_person("Luke", Some(planet.id)))
            .await
            .unwrap();

        let fetched = db.get_person(person.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Luke");
        assert_eq!(fetched.gender, Some(Gender::Male));
        assert_eq!(fetched.planet_id, Some(planet.id));

        assert!(db.get_person(person.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_hits_unique_index() {
        let db = test_db().await;

        db.insert_planet(sample_planet("Hoth")).await.unwrap();
        let err = db.insert_planet(sample_planet("Hoth")).await.unwrap_err();
        assert!(is_unique_violation(&err));

        assert_eq!(db.list_planets().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_favorite_hits_unique_index() {
        let db = test_db().await;

        let user = db.insert_user(sample_user(1)).await.unwrap();
        let planet = db.insert_planet(sample_planet("Endor")).await.unwrap();

        db.insert_favorite(user.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();
        let err = db
            .insert_favorite(user.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));

        assert_eq!(db.list_favorites_for_user(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_target_id_different_kind_is_not_a_duplicate() {
        let db = test_db().await;

        let user = db.insert_user(sample_user(1)).await.unwrap();
        let planet = db.insert_planet(sample_planet("Naboo")).await.unwrap();
        let person = db.insert_person(sample_person("Leia", None)).await.unwrap();
        assert_eq!(planet.id, person.id);

        db.insert_favorite(user.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();
        db.insert_favorite(user.id, FavoriteTarget::People(person.id))
            .await
            .unwrap();

        let favorites = db.list_favorites_for_user(user.id).await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].target, FavoriteTarget::Planet(planet.id));
        assert_eq!(favorites[1].target, FavoriteTarget::People(person.id));
    }

    #[tokio::test]
    async fn deleting_user_cascades_favorites() {
        let db = test_db().await;

        let user = db.insert_user(sample_user(1)).await.unwrap();
        let other = db.insert_user(sample_user(2)).await.unwrap();
        let planet = db.insert_planet(sample_planet("Dagobah")).await.unwrap();

        db.insert_favorite(user.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();
        db.insert_favorite(other.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();

        assert!(db.delete_user(user.id).await.unwrap());

        assert!(db.list_favorites_for_user(user.id).await.unwrap().is_empty());
        assert_eq!(db.list_favorites_for_user(other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_planet_clears_favorites_and_inhabitants() {
        let db = test_db().await;

        let user = db.insert_user(sample_user(1)).await.unwrap();
        let planet = db.insert_planet(sample_planet("Alderaan")).await.unwrap();
        let person = db
            .insert_person(sample_person("Bail", Some(planet.id)))
            .await
            .unwrap();

        db.insert_favorite(user.id, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();
        db.insert_favorite(user.id, FavoriteTarget::People(person.id))
            .await
            .unwrap();

        assert!(db.delete_planet(planet.id).await.unwrap());

        // The planet favorite is gone, the person favorite stays
        let favorites = db.list_favorites_for_user(user.id).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].target, FavoriteTarget::People(person.id));

        // The inhabitant keeps its row with a nulled planet reference
        let fetched = db.get_person(person.id).await.unwrap().unwrap();
        assert_eq!(fetched.planet_id, None);
    }

    #[tokio::test]
    async fn delete_favorite_reports_absence() {
        let db = test_db().await;

        let user = db.insert_user(sample_user(1)).await.unwrap();
        let person = db.insert_person(sample_person("Han", None)).await.unwrap();

        assert!(!db
            .delete_favorite(user.id, FavoriteTarget::People(person.id))
            .await
            .unwrap());

        db.insert_favorite(user.id, FavoriteTarget::People(person.id))
            .await
            .unwrap();
        assert!(db
            .delete_favorite(user.id, FavoriteTarget::People(person.id))
            .await
            .unwrap());
        assert!(db.list_favorites_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_person_writes_all_fields() {
        let db = test_db().await;

        let mut person = db.insert_person(sample_person("Obi-Wan", None)).await.unwrap();
        person.height = Some(182);
        person.gender = None;
        person.url = Some("https://swapi.dev/api/people/10/".to_string());

        db.update_person(&person).await.unwrap();

        let fetched = db.get_person(person.id).await.unwrap().unwrap();
        assert_eq!(fetched.height, Some(182));
        assert_eq!(fetched.gender, None);
        assert_eq!(fetched.url.as_deref(), Some("https://swapi.dev/api/people/10/"));
    }
}
