//! The per-tick update: move, collide, eat.

use log::{debug, info};
use rand::Rng;
use std::time::Duration;

use super::placement::place_food;
use super::{Collision, GameOver, Session, Status};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one cell, length unchanged
    Moved,
    /// Ate the food. `interval` is set when the tick rate changed
    Ate { score: u32, interval: Option<Duration> },
    /// The session is over; repeated on every later tick
    Ended(GameOver),
}

/// Advance the session by one cell.
///
/// Collision checks run wall, self, obstacle; the first hit is the reported
/// reason. Eating the last free cell ends the game, since food placement
/// needs somewhere to go. A finished session is left untouched.
pub fn tick<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> TickOutcome {
    if let Status::GameOver(game_over) = session.status {
        return TickOutcome::Ended(game_over);
    }

    session.direction = session.pending_direction;

    let head = match session.head() {
        Some(head) => head,
        None => return end(session, Collision::SelfCollision),
    };
    let next = head.step(session.direction);

    if !session.grid.in_bounds(next) {
        return end(session, Collision::Wall);
    }

    if session.snake.contains(&next) {
        return end(session, Collision::SelfCollision);
    }

    if session.obstacles.contains(&next) {
        return end(session, Collision::Obstacle);
    }

    session.snake.push_front(next);

    if next == session.food {
        session.score += 1;
        if session.snake.len() + session.obstacles.len() >= session.grid.cell_count() {
            return end(session, Collision::BoardFull);
        }
        session.food = place_food(rng, session.grid, &session.snake, &session.obstacles);

        let interval = session.speed.after_food(session.interval);
        if let Some(interval) = interval {
            session.interval = interval;
        }

        debug!(
            "Ate food at ({}, {}), score {}, next food at ({}, {})",
            next.x, next.y, session.score, session.food.x, session.food.y
        );

        TickOutcome::Ate {
            score: session.score,
            interval,
        }
    } else {
        session.snake.pop_back();
        TickOutcome::Moved
    }
}

fn end(session: &mut Session, reason: Collision) -> TickOutcome {
    let game_over = GameOver {
        reason,
        final_score: session.score,
    };
    session.status = Status::GameOver(game_over);
    info!("Game over: snake {} with score {}", reason.describe(), session.score);
    TickOutcome::Ended(game_over)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, GameSettings, Grid, SpeedPolicy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn cells(coords: &[(i32, i32)]) -> VecDeque<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    fn session_with(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> Session {
        Session::from_layout(
            Grid::new(20),
            cells(snake),
            direction,
            Cell::from(food),
            Vec::new(),
            SpeedPolicy::default(),
        )
    }

    #[test]
    fn test_eat_food_example() {
        let mut session = session_with(&[(2, 10), (1, 10), (0, 10)], Direction::Right, (3, 10));
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = tick(&mut session, &mut rng);

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                score: 1,
                interval: Some(Duration::from_millis(145)),
            }
        );
        assert_eq!(*session.snake(), cells(&[(3, 10), (2, 10), (1, 10), (0, 10)]));
        assert_eq!(session.score(), 1);
        assert!(!session.snake().contains(&session.food()));
        assert!(session.grid().in_bounds(session.food()));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut session = session_with(&[(2, 10), (1, 10), (0, 10)], Direction::Right, (15, 15));
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(tick(&mut session, &mut rng), TickOutcome::Moved);
        assert_eq!(*session.snake(), cells(&[(3, 10), (2, 10), (1, 10)]));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_wall_collision() {
        let mut session = session_with(&[(19, 4), (18, 4), (17, 4)], Direction::Right, (0, 0));
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = tick(&mut session, &mut rng);

        assert_eq!(
            outcome,
            TickOutcome::Ended(GameOver {
                reason: Collision::Wall,
                final_score: 0,
            })
        );
        assert_eq!(session.score(), 0);
        assert!(!session.is_running());
        // Board is left as it was
        assert_eq!(*session.snake(), cells(&[(19, 4), (18, 4), (17, 4)]));
    }

    #[test]
    fn test_wall_collision_at_top() {
        let mut session = session_with(&[(5, 0), (5, 1)], Direction::Up, (0, 10));
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            tick(&mut session, &mut rng),
            TickOutcome::Ended(GameOver { reason: Collision::Wall, .. })
        ));
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) heading down into (5,6), which is body
        let mut session = session_with(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Left,
            (0, 0),
        );
        session.request_direction(Direction::Down);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            tick(&mut session, &mut rng),
            TickOutcome::Ended(GameOver {
                reason: Collision::SelfCollision,
                final_score: 0,
            })
        );
    }

    #[test]
    fn test_tail_cell_counts_as_collision() {
        // Square loop where the next head lands on the current tail
        let mut session = session_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Left, (0, 0));
        session.request_direction(Direction::Down);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            tick(&mut session, &mut rng),
            TickOutcome::Ended(GameOver { reason: Collision::SelfCollision, .. })
        ));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut session = Session::from_layout(
            Grid::new(20),
            cells(&[(5, 5), (4, 5)]),
            Direction::Right,
            Cell::new(0, 0),
            vec![Cell::new(6, 5), Cell::new(6, 6)],
            SpeedPolicy::default(),
        );
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            tick(&mut session, &mut rng),
            TickOutcome::Ended(GameOver { reason: Collision::Obstacle, .. })
        ));
    }

    #[test]
    fn test_eating_last_free_cell_ends_game() {
        let mut session = Session::from_layout(
            Grid::new(2),
            cells(&[(1, 1), (1, 0), (0, 0)]),
            Direction::Left,
            Cell::new(0, 1),
            Vec::new(),
            SpeedPolicy::default(),
        );
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            tick(&mut session, &mut rng),
            TickOutcome::Ended(GameOver {
                reason: Collision::BoardFull,
                final_score: 1,
            })
        );
        assert_eq!(session.snake().len(), 4);
        assert!(!session.is_running());
    }

    #[test]
    fn test_ticks_after_game_over_are_noops() {
        let mut session = session_with(&[(19, 4), (18, 4)], Direction::Right, (0, 0));
        let mut rng = StdRng::seed_from_u64(0);

        let first = tick(&mut session, &mut rng);
        let snake_before = session.snake().clone();
        let second = tick(&mut session, &mut rng);

        assert_eq!(first, second);
        assert_eq!(*session.snake(), snake_before);
    }

    #[test]
    fn test_pending_direction_applied_on_tick() {
        let mut session = session_with(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (0, 0));
        session.request_direction(Direction::Up);
        assert_eq!(session.direction(), Direction::Right);

        let mut rng = StdRng::seed_from_u64(0);
        tick(&mut session, &mut rng);

        assert_eq!(session.direction(), Direction::Up);
        assert_eq!(session.head(), Some(Cell::new(5, 4)));
    }

    #[test]
    fn test_constant_speed_reports_no_interval() {
        let mut session = Session::from_layout(
            Grid::new(20),
            cells(&[(2, 10), (1, 10), (0, 10)]),
            Direction::Right,
            Cell::new(3, 10),
            Vec::new(),
            SpeedPolicy {
                progressive: false,
                ..SpeedPolicy::default()
            },
        );
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            tick(&mut session, &mut rng),
            TickOutcome::Ate { score: 1, interval: None }
        );
        assert_eq!(session.interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_random_play_invariants() {
        let settings = GameSettings::default();
        let directions = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new(&settings, &mut rng);
            let mut last_interval = session.interval();

            for step in 0..500 {
                let len_before = session.snake().len();
                let score_before = session.score();
                session.request_direction(directions[(step / 7 + seed as usize) % 4]);

                match tick(&mut session, &mut rng) {
                    TickOutcome::Moved => assert_eq!(session.snake().len(), len_before),
                    TickOutcome::Ate { score, .. } => {
                        assert_eq!(session.snake().len(), len_before + 1);
                        assert_eq!(score, score_before + 1);
                    }
                    TickOutcome::Ended(game_over) => {
                        assert_eq!(game_over.final_score, score_before);
                        break;
                    }
                }

                let grid = session.grid();
                assert!(session.snake().iter().all(|c| grid.in_bounds(*c)));
                assert!(grid.in_bounds(session.food()));
                assert!(!session.snake().contains(&session.food()));
                assert!(!session.obstacles().contains(&session.food()));
                assert!(session.interval() <= last_interval);
                assert!(session.interval() >= Duration::from_millis(50));
                last_interval = session.interval();
            }
        }
    }
}
