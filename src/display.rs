//! Display commands
//!
//! The core never lays anything out. It pushes primitive setters at a
//! retained display list: positions and sizes in px, a gradient background,
//! opacity, text and class toggles. The browser maps these onto DOM
//! elements; [`CommandLog`] records them for tests and headless runs.

use std::fmt;

/// Elements the game talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// The play area (carries the sky gradient)
    Game,
    Player,
    Score,
    Leaderboard,
    /// Star overlay
    Sky,
    /// Intro / game-over overlay
    Intro,
    IntroTitle,
    IntroBody,
    StartButton,
    Obstacle(u32),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Game => f.write_str("game"),
            ElementId::Player => f.write_str("player"),
            ElementId::Score => f.write_str("score"),
            ElementId::Leaderboard => f.write_str("leaderboard"),
            ElementId::Sky => f.write_str("sky"),
            ElementId::Intro => f.write_str("intro"),
            ElementId::IntroTitle => f.write_str("intro-title"),
            ElementId::IntroBody => f.write_str("intro-body"),
            ElementId::StartButton => f.write_str("startBtn"),
            ElementId::Obstacle(id) => write!(f, "obstacle-{}", id),
        }
    }
}

/// Primitive view setters
pub trait DisplayList {
    /// Create an obstacle element
    fn create_obstacle(&mut self, id: u32);
    /// Remove an element created with `create_obstacle`
    fn remove(&mut self, el: ElementId);
    /// Position from the play area's bottom-left; `left` None keeps the
    /// stylesheet's horizontal placement
    fn set_position(&mut self, el: ElementId, left: Option<f32>, bottom: f32);
    fn set_size(&mut self, el: ElementId, width: f32, height: f32);
    /// Two-stop vertical gradient, CSS color strings
    fn set_gradient(&mut self, el: ElementId, top: &str, bottom: &str);
    fn set_opacity(&mut self, el: ElementId, opacity: f32);
    fn set_text(&mut self, el: ElementId, text: &str);
    fn set_class(&mut self, el: ElementId, class: &str, on: bool);
}

/// A recorded display command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateObstacle(u32),
    Remove(ElementId),
    Position(ElementId, Option<f32>, f32),
    Size(ElementId, f32, f32),
    Gradient(ElementId, String, String),
    Opacity(ElementId, f32),
    Text(ElementId, String),
    Class(ElementId, String, bool),
}

/// Recording display
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    pub commands: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Most recent text set on an element
    pub fn last_text(&self, el: ElementId) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Text(e, text) if *e == el => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent state of a class on an element
    pub fn last_class(&self, el: ElementId, class: &str) -> Option<bool> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Class(e, name, on) if *e == el && name == class => Some(*on),
            _ => None,
        })
    }

    /// Most recent opacity set on an element
    pub fn last_opacity(&self, el: ElementId) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Opacity(e, o) if *e == el => Some(*o),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl DisplayList for CommandLog {
    fn create_obstacle(&mut self, id: u32) {
        self.commands.push(Command::CreateObstacle(id));
    }

    fn remove(&mut self, el: ElementId) {
        self.commands.push(Command::Remove(el));
    }

    fn set_position(&mut self, el: ElementId, left: Option<f32>, bottom: f32) {
        self.commands.push(Command::Position(el, left, bottom));
    }

    fn set_size(&mut self, el: ElementId, width: f32, height: f32) {
        self.commands.push(Command::Size(el, width, height));
    }

    fn set_gradient(&mut self, el: ElementId, top: &str, bottom: &str) {
        self.commands
            .push(Command::Gradient(el, top.to_string(), bottom.to_string()));
    }

    fn set_opacity(&mut self, el: ElementId, opacity: f32) {
        self.commands.push(Command::Opacity(el, opacity));
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.commands.push(Command::Text(el, text.to_string()));
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        self.commands.push(Command::Class(el, class.to_string(), on));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names() {
        assert_eq!(ElementId::StartButton.to_string(), "startBtn");
        assert_eq!(ElementId::Obstacle(7).to_string(), "obstacle-7");
    }

    #[test]
    fn test_log_queries_see_latest() {
        let mut log = CommandLog::new();
        log.set_text(ElementId::Score, "Score: 1");
        log.set_text(ElementId::Score, "Score: 2");
        log.set_class(ElementId::Intro, "hidden", true);
        log.set_class(ElementId::Intro, "hidden", false);

        assert_eq!(log.last_text(ElementId::Score), Some("Score: 2"));
        assert_eq!(log.last_class(ElementId::Intro, "hidden"), Some(false));
        assert_eq!(log.last_text(ElementId::Leaderboard), None);
    }
}
