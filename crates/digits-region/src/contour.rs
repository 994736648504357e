//! Border following for binary images
//!
//! Implements the topological border-following algorithm of Suzuki and Abe
//! on an 8-bit binary image. Nonzero pixels are foreground (8-connected),
//! zero pixels are background (4-connected), and the image is treated as
//! surrounded by a one-pixel background frame.
//!
//! Every border is reported, outer borders and hole borders alike, as a
//! flat list without hierarchy. The list is in retrieval order, which is
//! the reverse of raster discovery order: the first border found while
//! scanning from the top-left is the last one returned.

use digits_core::{Box, Pix};

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return None;
        }
        let idx = DIRTAB[(1 + dy) as usize][(1 + dx) as usize];
        if idx < 0 {
            None
        } else {
            Some(Self::from_index(idx as usize))
        }
    }

    /// Create direction from index (taken modulo 8)
    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::West,
            1 => Direction::NorthWest,
            2 => Direction::North,
            3 => Direction::NorthEast,
            4 => Direction::East,
            5 => Direction::SouthEast,
            6 => Direction::South,
            _ => Direction::SouthWest,
        }
    }

    /// Next direction turning clockwise
    #[inline]
    fn clockwise(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    /// Next direction turning counterclockwise
    #[inline]
    fn counterclockwise(self) -> Self {
        Self::from_index(self as usize + 7)
    }
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Direction lookup table: DIRTAB[1+dy][1+dx] gives direction index
const DIRTAB: [[i32; 3]; 3] = [[1, 2, 3], [0, -1, 4], [7, 6, 5]];

/// A point on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl BorderPoint {
    /// Create a new border point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }

    /// Direction from `self` to an 8-neighbour, if it is one
    #[inline]
    fn direction_to(self, other: BorderPoint) -> Option<Direction> {
        Direction::from_offset(other.x - self.x, other.y - self.y)
    }
}

impl From<(i32, i32)> for BorderPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Border type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    /// Border between a foreground component and the background around it
    #[default]
    Outer,
    /// Border between a foreground component and a background hole in it
    Hole,
}

/// Point storage for traced borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainApprox {
    /// Keep every border pixel
    None,
    /// Keep only the end points of horizontal, vertical and diagonal runs
    #[default]
    Simple,
}

/// A single traced border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Type of this border
    pub border_type: BorderType,
    /// Border points in traversal order, image coordinates
    pub points: Vec<BorderPoint>,
}

impl Contour {
    /// Get the number of points in this contour
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the contour has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the upright bounding rectangle of the contour points
    pub fn bounding_box(&self) -> Option<Box> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Box::from_extent(min_x, min_y, max_x, max_y))
    }
}

/// Labeled copy of a binary image with a one-pixel background frame.
///
/// Cells hold 0 (background), 1 (foreground not yet on a traced border)
/// or a signed border number once a border passes through them.
struct LabelGrid {
    width: i32,
    height: i32,
    cells: Vec<i32>,
}

impl LabelGrid {
    fn new(pix: &Pix) -> Self {
        let width = pix.width() as i32 + 2;
        let height = pix.height() as i32 + 2;
        let mut cells = vec![0i32; (width * height) as usize];
        for y in 0..pix.height() {
            let start = ((y as i32 + 1) * width + 1) as usize;
            for (cell, &v) in cells[start..].iter_mut().zip(pix.row(y)) {
                *cell = (v != 0) as i32;
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    fn get(&self, p: BorderPoint) -> i32 {
        self.cells[(p.y * self.width + p.x) as usize]
    }

    #[inline]
    fn set(&mut self, p: BorderPoint, val: i32) {
        self.cells[(p.y * self.width + p.x) as usize] = val;
    }

    /// Follow the border starting at `start`, whose background neighbour
    /// is `from`, labeling it with `nbd`.
    ///
    /// Returns the border pixels in traversal order (padded coordinates).
    fn follow(&mut self, start: BorderPoint, from: BorderPoint, nbd: i32) -> Vec<BorderPoint> {
        let Some(from_dir) = start.direction_to(from) else {
            return vec![start];
        };

        // Clockwise search for the last pixel of the border
        let mut dir = from_dir;
        let mut last = None;
        for _ in 0..8 {
            let p = start.moved(dir);
            if self.get(p) != 0 {
                last = Some(p);
                break;
            }
            dir = dir.clockwise();
        }
        let Some(last) = last else {
            // Isolated pixel
            self.set(start, -nbd);
            return vec![start];
        };

        let mut points = vec![start];
        let mut prev = last;
        let mut cur = start;
        loop {
            // Counterclockwise search for the next pixel, starting just
            // after the previous one
            let Some(mut dir) = cur.direction_to(prev) else {
                break;
            };
            let mut east_is_background = false;
            let mut next = prev;
            for _ in 0..8 {
                dir = dir.counterclockwise();
                let p = cur.moved(dir);
                if self.get(p) != 0 {
                    next = p;
                    break;
                }
                if dir == Direction::East {
                    east_is_background = true;
                }
            }

            if east_is_background {
                self.set(cur, -nbd);
            } else if self.get(cur) == 1 {
                self.set(cur, nbd);
            }

            if next == start && cur == last {
                break;
            }
            points.push(next);
            prev = cur;
            cur = next;
        }
        points
    }
}

/// Find all borders of a binary image
///
/// Nonzero pixels are foreground. Contours come back in retrieval order
/// (reverse discovery order), with point coordinates in the image frame.
///
/// # Arguments
/// * `pix` - Binary image (0 / nonzero)
/// * `approx` - Whether to keep every border pixel or only run end points
pub fn find_contours(pix: &Pix, approx: ChainApprox) -> Vec<Contour> {
    let mut grid = LabelGrid::new(pix);
    let mut contours = Vec::new();
    let mut nbd = 1;

    for y in 1..grid.height - 1 {
        for x in 1..grid.width - 1 {
            let here = BorderPoint::new(x, y);
            let val = grid.get(here);
            let left = BorderPoint::new(x - 1, y);
            let right = BorderPoint::new(x + 1, y);

            let (border_type, from) = if val == 1 && grid.get(left) == 0 {
                (BorderType::Outer, left)
            } else if val >= 1 && grid.get(right) == 0 {
                (BorderType::Hole, right)
            } else {
                continue;
            };

            nbd += 1;
            let traced = grid.follow(here, from, nbd);
            let points = match approx {
                ChainApprox::None => traced,
                ChainApprox::Simple => approximate_chain(&traced),
            };
            contours.push(Contour {
                border_type,
                points: points
                    .into_iter()
                    .map(|p| BorderPoint::new(p.x - 1, p.y - 1))
                    .collect(),
            });
        }
    }

    contours.reverse();
    contours
}

/// Chain code of a closed border: the direction from each point to the
/// next, wrapping from the last point back to the first.
///
/// Borders with fewer than two points have an empty chain code.
pub fn to_chain_code(points: &[BorderPoint]) -> Vec<Direction> {
    if points.len() < 2 {
        return Vec::new();
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .filter_map(|(a, b)| a.direction_to(*b))
        .collect()
}

/// Keep only the points of a closed border where the chain direction
/// changes.
pub fn approximate_chain(points: &[BorderPoint]) -> Vec<BorderPoint> {
    let chain = to_chain_code(points);
    if chain.len() != points.len() {
        return points.to_vec();
    }
    let n = chain.len();
    let kept: Vec<BorderPoint> = (0..n)
        .filter(|&i| chain[(i + n - 1) % n] != chain[i])
        .map(|i| points[i])
        .collect();
    if kept.is_empty() {
        points.to_vec()
    } else {
        kept
    }
}
