//! TOML game configuration: the field's rooms and the entity counts.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use robot_escape_core::{Rectangle, Size};
use robot_escape_system_placement::Config as PlacementConfig;
use robot_escape_world::Field;
use serde::Deserialize;
use thiserror::Error;

/// Smallest allowed bounding size of the field.
pub(crate) const MINIMUM_FIELD_SIZE: Size = Size::new(8, 8);
/// Largest allowed bounding size of the field.
pub(crate) const MAXIMUM_FIELD_SIZE: Size = Size::new(80, 40);

/// Largest magnitude any room coordinate, including far corners, may have.
pub(crate) const COORDINATE_LIMIT: i32 = 1 << 16;

const DEFAULT_ROBOTS: usize = 3;
const DEFAULT_EXITS: usize = 1;

/// Validated configuration for a single game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GameConfig {
    rooms: Vec<Rectangle>,
    robots: usize,
    exits: usize,
}

impl GameConfig {
    /// Reads and validates the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Room rectangles in declaration order.
    pub(crate) fn rooms(&self) -> &[Rectangle] {
        &self.rooms
    }

    /// Number of robots to place.
    pub(crate) fn robots(&self) -> usize {
        self.robots
    }

    /// Replaces the configured robot count.
    pub(crate) fn set_robots(&mut self, robots: usize) {
        self.robots = robots;
    }

    /// Builds the field described by the rooms.
    pub(crate) fn field(&self) -> Field {
        Field::from_rectangles(self.rooms.iter().copied())
    }

    /// Entity counts handed to the placement system.
    pub(crate) fn placement(&self) -> PlacementConfig {
        PlacementConfig::new(self.exits, self.robots)
    }
}

impl std::str::FromStr for GameConfig {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let raw: RawConfig = toml::from_str(contents)?;
        let rooms = raw.field.rooms()?;

        let field = Field::from_rectangles(rooms.iter().copied());
        let size = field.bounds().map(|bounds| bounds.size).unwrap_or_default();
        if !MINIMUM_FIELD_SIZE.fits_into(size) {
            return Err(ConfigError::FieldTooSmall { size });
        }
        if !size.fits_into(MAXIMUM_FIELD_SIZE) {
            return Err(ConfigError::FieldTooLarge { size });
        }
        if raw.game.exits == 0 {
            return Err(ConfigError::NoExits);
        }

        Ok(Self {
            rooms,
            robots: raw.game.robots,
            exits: raw.game.exits,
        })
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The document is not valid TOML or has unexpected keys or types.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// Neither dimensions nor rooms were given.
    #[error("the field needs either `width` and `height` or at least one `room`")]
    MissingField,
    /// Both dimensions and rooms were given.
    #[error("the field cannot define `width`/`height` and rooms at the same time")]
    AmbiguousField,
    /// Only one of `width` and `height` was given.
    #[error("the field needs both `width` and `height`")]
    IncompleteDimensions,
    /// A room mixes forms or leaves one incomplete.
    #[error("room {room} must use exactly one of `x`/`y`/`width`/`height`, `position`/`size` or `rectangle`")]
    RoomForm {
        /// One-based room number.
        room: usize,
    },
    /// A list value has the wrong number of elements.
    #[error("`{key}` of room {room} must have exactly {expected} elements, found {found}")]
    ListLength {
        /// One-based room number.
        room: usize,
        /// Offending key.
        key: &'static str,
        /// Required number of elements.
        expected: usize,
        /// Number of elements present.
        found: usize,
    },
    /// A room is empty or inverted.
    #[error("room {room} must have a positive width and height, found {}x{}", .size.width, .size.height)]
    NonPositiveSize {
        /// One-based room number.
        room: usize,
        /// Offending size.
        size: Size,
    },
    /// A room reaches past the supported coordinate range.
    #[error(
        "room {room} must lie within -{limit}..={limit} on both axes, found {}x{} at ({}, {})",
        .rectangle.size.width,
        .rectangle.size.height,
        .rectangle.position.x,
        .rectangle.position.y,
        limit = COORDINATE_LIMIT
    )]
    CoordinatesOutOfRange {
        /// One-based room number.
        room: usize,
        /// Offending room.
        rectangle: Rectangle,
    },
    /// The bounding rectangle of the rooms is below the minimum.
    #[error(
        "field size must be at least {}x{}, found {}x{}",
        MINIMUM_FIELD_SIZE.width,
        MINIMUM_FIELD_SIZE.height,
        .size.width,
        .size.height
    )]
    FieldTooSmall {
        /// Bounding size of the rooms.
        size: Size,
    },
    /// The bounding rectangle of the rooms exceeds the maximum.
    #[error(
        "field size must be at most {}x{}, found {}x{}",
        MAXIMUM_FIELD_SIZE.width,
        MAXIMUM_FIELD_SIZE.height,
        .size.width,
        .size.height
    )]
    FieldTooLarge {
        /// Bounding size of the rooms.
        size: Size,
    },
    /// A game needs somewhere to escape to.
    #[error("at least one exit is required")]
    NoExits,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    field: RawField,
    #[serde(default)]
    game: RawGame,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    width: Option<i32>,
    height: Option<i32>,
    #[serde(default, rename = "room")]
    rooms: Vec<RawRoom>,
}

impl RawField {
    fn rooms(&self) -> Result<Vec<Rectangle>, ConfigError> {
        let has_dimensions = self.width.is_some() || self.height.is_some();
        match (has_dimensions, self.rooms.is_empty()) {
            (false, true) => Err(ConfigError::MissingField),
            (true, false) => Err(ConfigError::AmbiguousField),
            (true, true) => {
                let (Some(width), Some(height)) = (self.width, self.height) else {
                    return Err(ConfigError::IncompleteDimensions);
                };
                let rectangle = check_room(1, Rectangle::new(0, 0, width, height))?;
                Ok(vec![rectangle])
            }
            (false, false) => (1..)
                .zip(&self.rooms)
                .map(|(room, raw)| raw.rectangle(room).and_then(|rect| check_room(room, rect)))
                .collect(),
        }
    }
}

fn check_room(room: usize, rectangle: Rectangle) -> Result<Rectangle, ConfigError> {
    if rectangle.size.width <= 0 || rectangle.size.height <= 0 {
        return Err(ConfigError::NonPositiveSize {
            room,
            size: rectangle.size,
        });
    }
    let corners = [
        rectangle.position.x,
        rectangle.position.y,
        rectangle.position.x.saturating_add(rectangle.size.width),
        rectangle.position.y.saturating_add(rectangle.size.height),
    ];
    if corners
        .iter()
        .any(|coordinate| coordinate.unsigned_abs() > COORDINATE_LIMIT.unsigned_abs())
    {
        return Err(ConfigError::CoordinatesOutOfRange { room, rectangle });
    }
    Ok(rectangle)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoom {
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    position: Option<Vec<i32>>,
    size: Option<Vec<i32>>,
    rectangle: Option<Vec<i32>>,
}

impl RawRoom {
    fn rectangle(&self, room: usize) -> Result<Rectangle, ConfigError> {
        let scalars = [self.x, self.y, self.width, self.height];
        let uses_scalars = scalars.iter().any(Option::is_some);
        let uses_pair = self.position.is_some() || self.size.is_some();
        let uses_list = self.rectangle.is_some();
        let forms = [uses_scalars, uses_pair, uses_list]
            .into_iter()
            .filter(|used| *used)
            .count();
        if forms != 1 {
            return Err(ConfigError::RoomForm { room });
        }

        if let Some(values) = &self.rectangle {
            let [x, y, width, height] = exact::<4>(room, "rectangle", values)?;
            return Ok(Rectangle::new(x, y, width, height));
        }

        if uses_pair {
            let (Some(position), Some(size)) = (&self.position, &self.size) else {
                return Err(ConfigError::RoomForm { room });
            };
            let [x, y] = exact::<2>(room, "position", position)?;
            let [width, height] = exact::<2>(room, "size", size)?;
            return Ok(Rectangle::new(x, y, width, height));
        }

        let [Some(x), Some(y), Some(width), Some(height)] = scalars else {
            return Err(ConfigError::RoomForm { room });
        };
        Ok(Rectangle::new(x, y, width, height))
    }
}

fn exact<const N: usize>(
    room: usize,
    key: &'static str,
    values: &[i32],
) -> Result<[i32; N], ConfigError> {
    values.try_into().map_err(|_| ConfigError::ListLength {
        room,
        key,
        expected: N,
        found: values.len(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGame {
    #[serde(default = "default_robots")]
    robots: usize,
    #[serde(default = "default_exits")]
    exits: usize,
}

impl Default for RawGame {
    fn default() -> Self {
        Self {
            robots: DEFAULT_ROBOTS,
            exits: DEFAULT_EXITS,
        }
    }
}

fn default_robots() -> usize {
    DEFAULT_ROBOTS
}

fn default_exits() -> usize {
    DEFAULT_EXITS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<GameConfig, ConfigError> {
        contents.parse()
    }

    #[test]
    fn dimensions_describe_a_single_room_at_origin() {
        let config = parse(
            r#"
            [field]
            width = 20
            height = 10
        "#,
        )
        .expect("valid configuration");

        assert_eq!(config.rooms(), &[Rectangle::new(0, 0, 20, 10)]);
        assert_eq!(config.robots(), 3);
        assert_eq!(config.placement(), PlacementConfig::new(1, 3));
    }

    #[test]
    fn every_room_form_is_accepted() {
        let config = parse(
            r#"
            [[field.room]]
            x = 0
            y = 0
            width = 12
            height = 8

            [[field.room]]
            position = [10, 4]
            size = [14, 6]

            [[field.room]]
            rectangle = [2, 10, 6, 4]

            [game]
            robots = 5
            exits = 2
        "#,
        )
        .expect("valid configuration");

        assert_eq!(
            config.rooms(),
            &[
                Rectangle::new(0, 0, 12, 8),
                Rectangle::new(10, 4, 14, 6),
                Rectangle::new(2, 10, 6, 4),
            ]
        );
        assert_eq!(config.placement(), PlacementConfig::new(2, 5));
        assert_eq!(
            config.field().bounds(),
            Some(Rectangle::new(0, 0, 24, 14))
        );
    }

    #[test]
    fn mixing_room_forms_is_rejected() {
        let error = parse(
            r#"
            [[field.room]]
            rectangle = [0, 0, 10, 10]
            x = 3
        "#,
        )
        .expect_err("two forms");
        assert!(matches!(error, ConfigError::RoomForm { room: 1 }));
    }

    #[test]
    fn position_without_size_is_rejected() {
        let error = parse(
            r#"
            [[field.room]]
            position = [0, 0]
        "#,
        )
        .expect_err("incomplete pair");
        assert!(matches!(error, ConfigError::RoomForm { room: 1 }));
    }

    #[test]
    fn partial_scalars_are_rejected() {
        let error = parse(
            r#"
            [[field.room]]
            rectangle = [0, 0, 10, 10]

            [[field.room]]
            x = 0
            y = 0
            width = 4
        "#,
        )
        .expect_err("missing height");
        assert!(matches!(error, ConfigError::RoomForm { room: 2 }));
    }

    #[test]
    fn list_lengths_are_checked() {
        let error = parse(
            r#"
            [[field.room]]
            rectangle = [0, 0, 10]
        "#,
        )
        .expect_err("three elements");
        assert_eq!(
            error.to_string(),
            "`rectangle` of room 1 must have exactly 4 elements, found 3"
        );
    }

    #[test]
    fn rooms_need_positive_size() {
        let error = parse(
            r#"
            [[field.room]]
            position = [0, 0]
            size = [10, 0]
        "#,
        )
        .expect_err("zero height");
        assert!(matches!(error, ConfigError::NonPositiveSize { room: 1, .. }));
    }

    #[test]
    fn rooms_far_from_the_origin_are_rejected() {
        let error = parse(
            r#"
            [[field.room]]
            rectangle = [2147483640, 0, 10, 10]
        "#,
        )
        .expect_err("far corner overflows");
        assert!(matches!(
            error,
            ConfigError::CoordinatesOutOfRange { room: 1, .. }
        ));

        let error = parse(
            r#"
            [[field.room]]
            rectangle = [0, 0, 10, 10]

            [[field.room]]
            position = [-70000, 0]
            size = [10, 10]
        "#,
        )
        .expect_err("origin out of range");
        assert!(matches!(
            error,
            ConfigError::CoordinatesOutOfRange { room: 2, .. }
        ));

        let config = parse(
            r#"
            [[field.room]]
            rectangle = [-65536, 65526, 10, 10]
        "#,
        )
        .expect("edge of the range");
        assert_eq!(config.rooms(), &[Rectangle::new(-65536, 65526, 10, 10)]);
    }

    #[test]
    fn field_must_be_defined_exactly_once() {
        assert!(matches!(parse("[field]\n"), Err(ConfigError::MissingField)));
        assert!(matches!(
            parse("[field]\nwidth = 10\n"),
            Err(ConfigError::IncompleteDimensions)
        ));
        assert!(matches!(
            parse(
                r#"
                [field]
                width = 10
                height = 10

                [[field.room]]
                rectangle = [0, 0, 10, 10]
            "#
            ),
            Err(ConfigError::AmbiguousField)
        ));
    }

    #[test]
    fn field_bounds_are_limited() {
        let error = parse("[field]\nwidth = 7\nheight = 20\n").expect_err("too narrow");
        assert_eq!(error.to_string(), "field size must be at least 8x8, found 7x20");

        let error = parse("[field]\nwidth = 81\nheight = 20\n").expect_err("too wide");
        assert!(matches!(error, ConfigError::FieldTooLarge { .. }));

        assert!(parse("[field]\nwidth = 80\nheight = 40\n").is_ok());
    }

    #[test]
    fn bounds_cover_disjoint_rooms() {
        let error = parse(
            r#"
            [[field.room]]
            rectangle = [0, 0, 4, 4]

            [[field.room]]
            rectangle = [76, 36, 5, 4]
        "#,
        )
        .expect_err("bounding box is 81 wide");
        assert!(matches!(error, ConfigError::FieldTooLarge { .. }));
    }

    #[test]
    fn games_need_an_exit() {
        let error = parse("[field]\nwidth = 10\nheight = 10\n[game]\nexits = 0\n")
            .expect_err("no exits");
        assert!(matches!(error, ConfigError::NoExits));

        let config = parse("[field]\nwidth = 10\nheight = 10\n[game]\nrobots = 0\n")
            .expect("robots are optional");
        assert_eq!(config.robots(), 0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = parse("[field]\nwidth = 10\nheight = 10\ndepth = 3\n").expect_err("unknown key");
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
