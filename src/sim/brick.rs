//! Bricks, power-up tags and the brick field layout

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::Config;
use crate::renderer::{Color, Surface, colors};

/// Power-up carried by a brick, released when it is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUp {
    /// Wider paddle (timed)
    Yellow,
    /// Bigger ball (timed)
    Green,
    /// Slower ball (timed)
    Red,
    /// Extra life (instant)
    Blue,
}

impl PowerUp {
    pub const ALL: [PowerUp; 4] = [PowerUp::Yellow, PowerUp::Green, PowerUp::Red, PowerUp::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUp::Yellow => "yellow",
            PowerUp::Green => "green",
            PowerUp::Red => "red",
            PowerUp::Blue => "blue",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUp::Yellow => colors::BRICK_YELLOW,
            PowerUp::Green => colors::BRICK_GREEN,
            PowerUp::Red => colors::BRICK_RED,
            PowerUp::Blue => colors::BRICK_BLUE,
        }
    }

    /// Whether the effect lasts for a duration and then reverts
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUp::Blue)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub status: BrickStatus,
    pub power_up: Option<PowerUp>,
}

impl Brick {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            status: BrickStatus::Active,
            power_up: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Active and free to receive a power-up
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.is_active() && self.power_up.is_none()
    }

    /// Strict point-in-rectangle test (edges do not count)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }

    /// Mark destroyed and hand back the power-up, if any
    ///
    /// Returns `None` for a brick that was already destroyed.
    pub fn destroy(&mut self) -> Option<Option<PowerUp>> {
        if !self.is_active() {
            return None;
        }
        self.status = BrickStatus::Destroyed;
        Some(self.power_up.take())
    }

    pub fn color(&self) -> Color {
        self.power_up
            .map(|p| p.color())
            .unwrap_or(colors::BRICK_DEFAULT)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        if self.is_active() {
            surface.fill_rect(self.x, self.y, self.width, self.height, self.color());
        }
    }
}

/// Column-major matrix of bricks; owns every brick in play
#[derive(Debug, Clone, PartialEq)]
pub struct BrickField {
    pub columns: u32,
    pub rows: u32,
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Lay out a fresh field of active, untagged bricks for a canvas
    pub fn layout(config: &Config, canvas_width: f32, canvas_height: f32) -> Self {
        let (columns, rows) = config.brick_grid(canvas_width, canvas_height);
        let pitch_x = config.brick_width + config.brick_padding;
        let pitch_y = config.brick_height + config.brick_padding;

        let mut bricks = Vec::with_capacity((columns * rows) as usize);
        for c in 0..columns {
            for r in 0..rows {
                let x = c as f32 * pitch_x + config.brick_offset_left;
                let y = r as f32 * pitch_y + config.brick_offset_top;
                bricks.push(Brick::new(x, y, config.brick_width, config.brick_height));
            }
        }

        log::debug!("Laid out {}x{} brick field", columns, rows);
        Self {
            columns,
            rows,
            bricks,
        }
    }

    /// Flat index of column `c`, row `r`
    #[inline]
    pub fn index(&self, c: u32, r: u32) -> usize {
        (c * self.rows + r) as usize
    }

    pub fn get(&self, c: u32, r: u32) -> Option<&Brick> {
        if c < self.columns && r < self.rows {
            self.bricks.get(self.index(c, r))
        } else {
            None
        }
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    /// True once every brick is destroyed (vacuously true for an empty field)
    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    /// Number of active bricks carrying a power-up
    pub fn tagged_count(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.is_active() && b.power_up.is_some())
            .count()
    }

    /// Indices of active bricks with no power-up
    pub fn eligible_indices(&self) -> Vec<usize> {
        self.bricks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_eligible())
            .map(|(i, _)| i)
            .collect()
    }

    /// Tag `count` distinct eligible bricks with the fixed kinds in order
    ///
    /// Kinds cycle through yellow, green, red, blue. Fewer bricks are tagged
    /// when fewer are eligible. Returns how many were tagged.
    pub fn assign_power_ups<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> usize {
        let eligible = self.eligible_indices();
        let amount = count.min(eligible.len());
        let picks = rand::seq::index::sample(rng, eligible.len(), amount);
        for (n, pick) in picks.into_iter().enumerate() {
            let kind = PowerUp::ALL[n % PowerUp::ALL.len()];
            self.bricks[eligible[pick]].power_up = Some(kind);
        }
        if amount < count {
            log::warn!(
                "Only {} of {} power-ups placed ({} eligible bricks)",
                amount,
                count,
                eligible.len()
            );
        }
        amount
    }

    /// Tag one random eligible brick with a random kind
    ///
    /// Returns the brick index, or `None` when no brick is eligible.
    pub fn assign_random_power_up<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let eligible = self.eligible_indices();
        let &idx = eligible.choose(rng)?;
        let kind = PowerUp::random(rng);
        self.bricks[idx].power_up = Some(kind);
        log::debug!("Power-up {} moved to brick {}", kind.as_str(), idx);
        Some(idx)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for brick in &self.bricks {
            brick.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrickLayout;
    use crate::renderer::ShapeBatch;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> BrickField {
        BrickField::layout(&Config::default(), 600.0, 700.0)
    }

    #[test]
    fn test_layout_positions_column_major() {
        let f = field();
        assert_eq!((f.columns, f.rows), (18, 12));
        assert_eq!(f.len(), 216);

        let first = f.get(0, 0).unwrap();
        assert_eq!((first.x, first.y), (5.0, 30.0));
        let b = f.get(2, 3).unwrap();
        assert_eq!((b.x, b.y), (2.0 * 33.0 + 5.0, 3.0 * 25.0 + 30.0));
        assert_eq!(f.bricks()[f.index(2, 3)], *b);
        assert!(f.get(18, 0).is_none());
    }

    #[test]
    fn test_fixed_layout_fits_canvas() {
        let config = Config {
            layout: BrickLayout::classic_fixed(),
            ..Default::default()
        };
        let f = BrickField::layout(&config, 600.0, 700.0);
        assert_eq!(f.len(), 180);
        let last = f.get(17, 9).unwrap();
        assert!(last.x + last.width <= 600.0);
    }

    #[test]
    fn test_assign_exactly_four_distinct_kinds() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(f.assign_power_ups(&mut rng, 4), 4);
        assert_eq!(f.tagged_count(), 4);

        let mut kinds: Vec<PowerUp> = f.bricks().iter().filter_map(|b| b.power_up).collect();
        kinds.sort_by_key(|k| k.as_str());
        let mut expected = PowerUp::ALL.to_vec();
        expected.sort_by_key(|k| k.as_str());
        assert_eq!(kinds, expected);
    }

    #[test]
    fn test_assign_with_too_few_bricks() {
        let config = Config {
            layout: BrickLayout::Fixed {
                columns: 1,
                rows: 2,
            },
            ..Default::default()
        };
        let mut f = BrickField::layout(&config, 600.0, 700.0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(f.assign_power_ups(&mut rng, 4), 2);
        assert_eq!(f.tagged_count(), 2);
    }

    #[test]
    fn test_random_assignment_only_hits_eligible_bricks() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(3);
        // Leave a single eligible brick
        let keep = f.index(5, 5);
        for (i, b) in f.bricks_mut().iter_mut().enumerate() {
            if i != keep {
                b.status = BrickStatus::Destroyed;
            }
        }
        assert_eq!(f.assign_random_power_up(&mut rng), Some(keep));
        // Now nothing is eligible; no hang, no tag
        assert_eq!(f.assign_random_power_up(&mut rng), None);
    }

    #[test]
    fn test_destroy_is_idempotent_and_consumes_tag() {
        let mut b = Brick::new(0.0, 0.0, 28.0, 20.0);
        b.power_up = Some(PowerUp::Red);
        assert_eq!(b.destroy(), Some(Some(PowerUp::Red)));
        assert_eq!(b.power_up, None);
        assert_eq!(b.destroy(), None);
        assert!(!b.is_active());
    }

    #[test]
    fn test_contains_is_strict() {
        let b = Brick::new(5.0, 30.0, 28.0, 20.0);
        assert!(b.contains(Vec2::new(10.0, 40.0)));
        assert!(!b.contains(Vec2::new(5.0, 40.0)));
        assert!(!b.contains(Vec2::new(10.0, 50.0)));
    }

    #[test]
    fn test_draw_skips_destroyed_and_colors_tags() {
        let mut b = Brick::new(0.0, 0.0, 28.0, 20.0);
        b.power_up = Some(PowerUp::Yellow);
        let mut batch = ShapeBatch::new();
        b.draw(&mut batch);
        assert_eq!(batch.vertices().len(), 6);
        assert_eq!(batch.vertices()[0].color, colors::BRICK_YELLOW);

        b.power_up = None;
        assert_eq!(b.color(), colors::BRICK_DEFAULT);

        batch.clear();
        b.status = BrickStatus::Destroyed;
        b.draw(&mut batch);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_all_destroyed() {
        let mut f = field();
        assert!(!f.all_destroyed());
        for b in f.bricks_mut() {
            b.destroy();
        }
        assert!(f.all_destroyed());
        assert_eq!(f.active_count(), 0);
    }
}
