//! Bundled microgames.
//!
//! Each module implements [`Game`](microgames_core::Game) against the
//! capability [`Api`](microgames_core::Api) only; none of them can see the
//! rotation or other sessions.

pub mod get_fish;
pub mod squeeze;

use microgames_core::Game;

pub use get_fish::GetFish;
pub use squeeze::Squeeze;

/// The default rotation, in play order.
pub fn default_games() -> Vec<Box<dyn Game>> {
    vec![Box::new(GetFish::new()), Box::new(Squeeze::new())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rotation_order() {
        let prompts: Vec<String> = default_games().iter().map(|g| g.prompt().to_string()).collect();
        assert_eq!(prompts, vec!["Get the fish!", "Squeeze!"]);
    }
}
