//! Dynamic dispatch through a trait object
//!
//! Run with: cargo run --bin trait_dispatch

trait Animal {
    fn speak(&self) -> &'static str;
}

struct Dog;

impl Animal for Dog {
    fn speak(&self) -> &'static str {
        "Woof!"
    }
}

fn main() {
    // Box<dyn Animal> owns the value; no manual delete.
    let animal: Box<dyn Animal> = Box::new(Dog);
    println!("{}", animal.speak());
}
