//! Demo data loaded at startup.

use crate::models::{Client, Phone, User};

const CLIENTS: u64 = 10;
const USERS: u64 = 20;
const PHONES: u64 = 20;

pub fn seed_clients() -> Vec<Client> {
    (0..CLIENTS)
        .map(|i| Client {
            id: i + 1,
            email: format!("user{i}@user.user"),
        })
        .collect()
}

/// Users are spread over `clients` round-robin.
pub fn seed_users(clients: &[Client]) -> Vec<User> {
    (0..USERS)
        .map(|i| User {
            id: 0,
            first_name: format!("Prénom {i}"),
            last_name: format!("Nom {i}"),
            email: format!("email{i}@mail.com"),
            client: (!clients.is_empty()).then(|| clients[i as usize % clients.len()].clone()),
        })
        .collect()
}

pub fn seed_phones() -> Vec<Phone> {
    (0..PHONES)
        .map(|i| Phone {
            id: 0,
            name: format!("nom {i}"),
            brand: format!("Marque{i}"),
            color: format!("Couleur{i}"),
            price: i as f64,
            description: format!("Description{i}"),
        })
        .collect()
}
