//! Board palette, chosen for a dark terminal background.

use crossterm::style::Color;

use wayviz_core::Cell;

/// Plain road.
pub const ROAD: Color = Color::Rgb {
    r: 24,
    g: 25,
    b: 30,
};
/// Wall block.
pub const WALL: Color = Color::Rgb {
    r: 82,
    g: 85,
    b: 95,
};
/// The chosen start cell.
pub const START: Color = Color::Rgb {
    r: 80,
    g: 200,
    b: 80,
};
/// The chosen end cell.
pub const END: Color = Color::Rgb {
    r: 255,
    g: 85,
    b: 85,
};
/// Final path cells, lit during the path phase.
pub const PATH: Color = Color::Rgb {
    r: 220,
    g: 200,
    b: 60,
};
/// Expanded cell of a replayed trace frame.
pub const CURRENT: Color = Color::Rgb {
    r: 100,
    g: 130,
    b: 255,
};
/// Considered neighbour in a replayed trace frame.
pub const NEIGHBOR: Color = Color::Rgb {
    r: 70,
    g: 95,
    b: 150,
};

/// Default text.
pub const FG: Color = Color::Rgb {
    r: 248,
    g: 248,
    b: 242,
};
/// Dimmed text for the key hints.
pub const FG_DIM: Color = Color::Rgb {
    r: 130,
    g: 132,
    b: 138,
};
/// Notice line.
pub const FG_NOTICE: Color = Color::Rgb {
    r: 220,
    g: 200,
    b: 60,
};

/// Background for one board cell. Selection beats animation marks, path
/// beats trace marks.
pub fn cell_bg(cell: &Cell, is_start: bool, is_end: bool) -> Color {
    if is_start {
        START
    } else if is_end {
        END
    } else if cell.path_active {
        PATH
    } else if cell.current_active {
        CURRENT
    } else if cell.current_neighbor {
        NEIGHBOR
    } else if cell.is_wall() {
        WALL
    } else {
        ROAD
    }
}
