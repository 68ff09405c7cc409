//! Shared fixtures for studio integration tests.

#![allow(dead_code)]

use pvid_models::Product;

pub fn speaker() -> Product {
    Product::new(
        "Bluetooth Speaker",
        49.99,
        vec!["https://cdn.example.com/speaker.jpg".to_string()],
    )
    .with_description("Waterproof, 12h battery")
    .with_original_price(79.99)
}

pub fn lamp() -> Product {
    Product::new(
        "Desk Lamp",
        24.0,
        vec!["https://cdn.example.com/lamp.jpg".to_string()],
    )
}
