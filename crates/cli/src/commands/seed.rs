//! Seed the database with demo data.
//!
//! Creates the `demo` user, two stores, a handful of items and a shopping
//! list. Does nothing if the `demo` user already exists.

use grocery_core::{ItemCategory, Price, Username};
use grocery_web::db::items::ItemFields;
use grocery_web::db::stores::StoreFields;
use grocery_web::db::{ItemRepository, ShoppingListRepository, StoreRepository};
use grocery_web::services::auth::{AuthError, AuthService};

use super::{CliError, connect};

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo-password";

/// Demo stores: (title, address).
const STORES: [(&str, &str); 2] = [
    ("Corner Shop", "1 Main St"),
    ("Farmers Market", "22 Orchard Rd"),
];

/// Demo items: (name, price, category, store index).
const ITEMS: [(&str, &str, ItemCategory, usize); 5] = [
    ("Milk", "3.50", ItemCategory::Pantry, 0),
    ("Sourdough", "5.25", ItemCategory::Bakery, 0),
    ("Frozen Peas", "2.49", ItemCategory::Frozen, 0),
    ("Apples", "1.99", ItemCategory::Produce, 1),
    ("Sliced Turkey", "6.75", ItemCategory::Deli, 1),
];

/// Insert the demo data.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let auth = AuthService::new(&pool);
    let username = Username::parse(DEMO_USERNAME).map_err(AuthError::from)?;

    if auth.is_username_taken(&username).await? {
        tracing::info!("Demo user already exists, nothing to seed");
        return Ok(());
    }

    let user = auth.signup(&username, DEMO_PASSWORD).await?;

    let store_repo = StoreRepository::new(&pool);
    let mut stores = Vec::with_capacity(STORES.len());
    for (title, address) in STORES {
        let input = StoreFields {
            title: title.to_owned(),
            address: address.to_owned(),
        };
        stores.push(store_repo.create(&input, user.id).await?);
    }

    let item_repo = ItemRepository::new(&pool);
    let shopping_list = ShoppingListRepository::new(&pool);
    for (name, price, category, store_index) in ITEMS {
        let Some(store) = stores.get(store_index) else {
            continue;
        };
        let input = ItemFields {
            name: name.to_owned(),
            price: Price::parse(price)?,
            category,
            photo_url: format!(
                "https://images.example.com/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            ),
            store_id: store.id,
        };
        let item = item_repo.create(&input, user.id).await?;

        if category == ItemCategory::Pantry || category == ItemCategory::Produce {
            shopping_list.add(user.id, item.id).await?;
        }
    }

    tracing::info!(
        "Seeded demo data: user '{}' (password '{}'), {} stores, {} items",
        DEMO_USERNAME,
        DEMO_PASSWORD,
        STORES.len(),
        ITEMS.len()
    );
    Ok(())
}
