// demos/storefront/src/main.rs

// Declare modules for the application
mod config;
mod rest;
mod store_file;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::Level;

use cartsync::{CartEngine, CartLineItem, ProductId};

use crate::config::AppConfig;
use crate::rest::RestCartGateway;
use crate::store_file::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .init();

  let config = AppConfig::from_env()?;
  let store = Arc::new(FileStore::open(config.store_path.clone())?);
  let gateway = Arc::new(RestCartGateway::new(&config.base_url, store.clone()));
  let engine = CartEngine::new(gateway.clone(), store);

  println!("storefront client. commands: login <email> <password> | refresh | show |");
  println!("  inc <id> | dec <id> | rm <id> | add <id> <price> <qty> | checkout | quit");

  let stdin = io::stdin();
  loop {
    print!("> ");
    io::stdout().flush()?;
    let mut input = String::new();
    if stdin.lock().read_line(&mut input)? == 0 {
      break;
    }
    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts.as_slice() {
      ["login", email, password] => match gateway.login(email, password).await {
        Ok(identity) => println!("logged in, cart {}", identity.cart_id),
        Err(error) => println!("login failed: {error}"),
      },
      ["refresh"] => {
        let status = engine.refresh().await;
        println!("refresh: {status:?}");
        render(&engine);
      }
      ["show"] => render(&engine),
      ["inc", id] => match parse_id(id) {
        Some(id) => println!("{:?}", engine.increase(id).await),
        None => println!("bad product id"),
      },
      ["dec", id] => match parse_id(id) {
        Some(id) => println!("{:?}", engine.decrease(id).await),
        None => println!("bad product id"),
      },
      ["rm", id] => match parse_id(id) {
        Some(id) => println!("{:?}", engine.remove(id).await),
        None => println!("bad product id"),
      },
      ["add", id, price, qty] => match (parse_id(id), price.parse::<f64>(), qty.parse::<u32>()) {
        (Some(id), Ok(price), Ok(qty)) => {
          let item = CartLineItem {
            product_id: id,
            name: format!("product-{id}"),
            image_ref: None,
            unit_price: price,
            quantity: qty,
            size: "M".to_string(),
          };
          println!("{:?}", engine.add(item).await);
        }
        _ => println!("usage: add <id> <price> <qty>"),
      },
      ["checkout"] => match engine.begin_checkout() {
        Ok(totals) => println!("checkout handed off, total ${:.2}", totals.total),
        Err(error) => println!("checkout failed: {error}"),
      },
      ["quit"] | ["exit"] => break,
      [] => {}
      _ => println!("unknown command"),
    }
  }

  Ok(())
}

fn parse_id(raw: &str) -> Option<ProductId> {
  raw.parse().ok()
}

fn render<G: cartsync::CartGateway>(engine: &CartEngine<G>) {
  let cart = engine.cart();
  if cart.is_empty() {
    println!("(cart is empty)");
    return;
  }
  for item in &cart.items {
    println!(
      "  #{:<6} {:<24} size {}  ${:<8.2} x{}",
      item.product_id, item.name, item.size, item.unit_price, item.quantity
    );
  }
  let totals = cart.totals();
  println!("  subtotal ${:.2}  total ${:.2}", totals.subtotal, totals.total);
}
