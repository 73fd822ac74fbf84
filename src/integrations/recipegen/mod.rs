pub mod client;

pub use client::RecipeGenClient;
