//! Tokenizer and parser for the SVG path mini-language.
//!
//! Supports every drawing command of the `d` attribute: move-to, line-to
//! (including horizontal/vertical), cubic and quadratic Bezier curves with
//! their smooth variants, elliptical arcs and close-path, each in absolute
//! (upper-case) and relative (lower-case) form.
//!
//! The parser produces raw segments in drawing order. Filtering of
//! zero-length segments and length bookkeeping happen in
//! [`TrackCurve`](crate::TrackCurve).

use tracing::trace;

use crate::error::{GeometryError, GeometryResult};
use crate::point::Point;
use crate::segment::{CubicBezier, EllipticalArc, Line, QuadraticBezier, Segment};

/// Segments parsed from a path description, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedPath {
    /// Drawn segments. Move-to commands do not produce segments.
    pub segments: Vec<Segment>,
    /// Number of subpaths (move-to commands that were followed by drawing).
    pub subpaths: usize,
}

/// Parse an SVG path description into segments.
///
/// # Errors
///
/// Returns [`GeometryError::MalformedPath`] with the byte offset of the first
/// problem when the data does not start with a move-to, contains an unknown
/// command, is missing arguments, or has an invalid number or arc flag.
///
/// # Example
///
/// ```
/// use openracing_track_geometry::parse_path_data;
///
/// let parsed = parse_path_data("M10,10 h20 v20 q-10 10 -20 0 z")?;
/// assert_eq!(parsed.segments.len(), 4);
/// assert_eq!(parsed.subpaths, 1);
/// # Ok::<(), openracing_track_geometry::GeometryError>(())
/// ```
pub fn parse_path_data(data: &str) -> GeometryResult<ParsedPath> {
    PathParser::new(data).parse()
}

/// Byte-level tokenizer over path data.
struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skip whitespace and at most one comma.
    fn skip_separators(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.bytes.len()
    }

    /// True when the next token starts a number.
    fn number_follows(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(b'0'..=b'9' | b'+' | b'-' | b'.'))
    }

    fn take_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> GeometryResult<f64> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }

        let mut digits = self.take_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.take_digits();
        }
        if digits == 0 {
            return Err(GeometryError::malformed(start, "expected a number"));
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let exponent_start = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.take_digits() == 0 {
                // Not an exponent after all; leave the `e` for the next token.
                self.pos = exponent_start;
            }
        }

        let text = self
            .bytes
            .get(start..self.pos)
            .and_then(|slice| std::str::from_utf8(slice).ok())
            .ok_or_else(|| GeometryError::malformed(start, "invalid number bytes"))?;

        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| GeometryError::malformed(start, format!("invalid number '{text}'")))
    }

    fn flag(&mut self) -> GeometryResult<bool> {
        self.skip_separators();
        let position = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            Some(other) => Err(GeometryError::malformed(
                position,
                format!("arc flag must be 0 or 1, found '{}'", char::from(other)),
            )),
            None => Err(GeometryError::malformed(
                position,
                "arc flag must be 0 or 1, found end of data",
            )),
        }
    }

    fn point(&mut self) -> GeometryResult<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }
}

#[inline]
fn resolve(origin: Point, point: Point, relative: bool) -> Point {
    if relative { origin + point } else { point }
}

/// What the previous command left behind for the smooth variants `S` and `T`.
#[derive(Clone, Copy, Debug)]
enum LastControl {
    None,
    Cubic(Point),
    Quadratic(Point),
}

struct PathParser<'a> {
    lexer: Lexer<'a>,
    current: Point,
    subpath_start: Point,
    last_control: LastControl,
    subpath_open: bool,
    output: ParsedPath,
}

impl<'a> PathParser<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            lexer: Lexer::new(data),
            current: Point::default(),
            subpath_start: Point::default(),
            last_control: LastControl::None,
            subpath_open: false,
            output: ParsedPath::default(),
        }
    }

    fn parse(mut self) -> GeometryResult<ParsedPath> {
        let mut first = true;

        while !self.lexer.at_end() {
            let position = self.lexer.pos;
            let Some(command) = self.lexer.peek() else {
                break;
            };

            if !command.is_ascii_alphabetic() {
                return Err(GeometryError::malformed(
                    position,
                    format!("expected a path command, found '{}'", char::from(command)),
                ));
            }
            if first && !matches!(command, b'M' | b'm') {
                return Err(GeometryError::malformed(
                    position,
                    "path data must begin with a move-to command",
                ));
            }
            first = false;
            self.lexer.pos += 1;

            self.command(command, position)?;
        }

        trace!(
            segments = self.output.segments.len(),
            subpaths = self.output.subpaths,
            "Parsed path data"
        );
        Ok(self.output)
    }

    fn command(&mut self, command: u8, position: usize) -> GeometryResult<()> {
        let relative = command.is_ascii_lowercase();

        if matches!(command, b'Z' | b'z') {
            self.close_path();
            return Ok(());
        }

        if !self.lexer.number_follows() {
            return Err(GeometryError::malformed(
                self.lexer.pos,
                format!("command '{}' is missing its arguments", char::from(command)),
            ));
        }

        match command.to_ascii_uppercase() {
            b'M' => {
                let target = resolve(self.current, self.lexer.point()?, relative);
                self.move_to(target);
                // Extra coordinate pairs after a move-to are implicit line-tos.
                while self.lexer.number_follows() {
                    let target = resolve(self.current, self.lexer.point()?, relative);
                    self.line_to(target);
                }
            }
            b'L' => loop {
                let target = resolve(self.current, self.lexer.point()?, relative);
                self.line_to(target);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'H' => loop {
                let x = self.lexer.number()?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'V' => loop {
                let y = self.lexer.number()?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'C' => loop {
                let control1 = resolve(self.current, self.lexer.point()?, relative);
                let control2 = resolve(self.current, self.lexer.point()?, relative);
                let end = resolve(self.current, self.lexer.point()?, relative);
                self.cubic_to(control1, control2, end);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'S' => loop {
                let control1 = match self.last_control {
                    LastControl::Cubic(previous) => self.current + (self.current - previous),
                    _ => self.current,
                };
                let control2 = resolve(self.current, self.lexer.point()?, relative);
                let end = resolve(self.current, self.lexer.point()?, relative);
                self.cubic_to(control1, control2, end);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'Q' => loop {
                let control = resolve(self.current, self.lexer.point()?, relative);
                let end = resolve(self.current, self.lexer.point()?, relative);
                self.quadratic_to(control, end);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'T' => loop {
                let control = match self.last_control {
                    LastControl::Quadratic(previous) => self.current + (self.current - previous),
                    _ => self.current,
                };
                let end = resolve(self.current, self.lexer.point()?, relative);
                self.quadratic_to(control, end);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            b'A' => loop {
                let rx = self.lexer.number()?;
                let ry = self.lexer.number()?;
                let rotation = self.lexer.number()?;
                let large_arc = self.lexer.flag()?;
                let sweep = self.lexer.flag()?;
                let end = resolve(self.current, self.lexer.point()?, relative);
                self.arc_to(Point::new(rx, ry), rotation, large_arc, sweep, end);
                if !self.lexer.number_follows() {
                    break;
                }
            },
            _ => {
                return Err(GeometryError::malformed(
                    position,
                    format!("unknown path command '{}'", char::from(command)),
                ));
            }
        }

        Ok(())
    }

    fn move_to(&mut self, target: Point) {
        self.current = target;
        self.subpath_start = target;
        self.subpath_open = false;
        self.last_control = LastControl::None;
    }

    fn push(&mut self, segment: Segment, control: LastControl) {
        if !self.subpath_open {
            self.subpath_open = true;
            self.output.subpaths += 1;
        }
        self.current = segment.end();
        self.last_control = control;
        self.output.segments.push(segment);
    }

    fn line_to(&mut self, end: Point) {
        self.push(Segment::Line(Line::new(self.current, end)), LastControl::None);
    }

    fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.push(
            Segment::Cubic(CubicBezier::new(self.current, control1, control2, end)),
            LastControl::Cubic(control2),
        );
    }

    fn quadratic_to(&mut self, control: Point, end: Point) {
        self.push(
            Segment::Quadratic(QuadraticBezier::new(self.current, control, end)),
            LastControl::Quadratic(control),
        );
    }

    fn arc_to(&mut self, radii: Point, rotation: f64, large_arc: bool, sweep: bool, end: Point) {
        match EllipticalArc::from_endpoints(self.current, radii, rotation, large_arc, sweep, end) {
            Some(segment) => self.push(segment, LastControl::None),
            None => {
                self.current = end;
                self.last_control = LastControl::None;
            }
        }
    }

    fn close_path(&mut self) {
        if self.subpath_open && self.current.distance_to(self.subpath_start) > 0.0 {
            self.line_to(self.subpath_start);
        }
        self.current = self.subpath_start;
        self.subpath_open = false;
        self.last_control = LastControl::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must(result: GeometryResult<ParsedPath>) -> ParsedPath {
        match result {
            Ok(parsed) => parsed,
            Err(e) => panic!("unexpected parse error: {:?}", e),
        }
    }

    fn malformed_position(result: GeometryResult<ParsedPath>) -> usize {
        match result {
            Err(GeometryError::MalformedPath { position, .. }) => position,
            other => panic!("expected MalformedPath, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_absolute_lines() {
        let parsed = must(parse_path_data("M 0 0 L 10 0 L 10 10"));
        assert_eq!(parsed.segments.len(), 2);
        assert_eq!(parsed.segments[1].end(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_parse_relative_lines() {
        let parsed = must(parse_path_data("m5,5 l10,0 l0,10"));
        assert_eq!(parsed.segments[0].start(), Point::new(5.0, 5.0));
        assert_eq!(parsed.segments[1].end(), Point::new(15.0, 15.0));
    }

    #[test]
    fn test_implicit_line_to_after_move() {
        let parsed = must(parse_path_data("M0 0 10 0 10 10"));
        assert_eq!(parsed.segments.len(), 2);
        assert!(matches!(parsed.segments[0], Segment::Line(_)));
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let parsed = must(parse_path_data("M1 2 H 5 v 3 h -4 V 2"));
        let ends: Vec<Point> = parsed.segments.iter().map(Segment::end).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(5.0, 2.0),
                Point::new(5.0, 5.0),
                Point::new(1.0, 5.0),
                Point::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_compact_number_syntax() {
        // "1.5.5" is two numbers, "-2-3" is two numbers, exponents are accepted.
        let parsed = must(parse_path_data("M1.5.5L-2-3l1e1,2E-1"));
        assert_eq!(parsed.segments[0].start(), Point::new(1.5, 0.5));
        assert_eq!(parsed.segments[0].end(), Point::new(-2.0, -3.0));
        let end = parsed.segments[1].end();
        assert!((end.x - 8.0).abs() < 1e-12 && (end.y + 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_cubic_reflects_control() {
        let parsed = must(parse_path_data("M0 0 C 0 10 10 10 10 0 S 20 -10 20 0"));
        match parsed.segments[1] {
            Segment::Cubic(cubic) => {
                assert_eq!(cubic.control1, Point::new(10.0, -10.0));
                assert_eq!(cubic.control2, Point::new(20.0, -10.0));
            }
            other => panic!("expected cubic, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_quadratic_reflects_control() {
        let parsed = must(parse_path_data("M0 0 Q 5 10 10 0 T 20 0"));
        match parsed.segments[1] {
            Segment::Quadratic(quad) => assert_eq!(quad.control, Point::new(15.0, -10.0)),
            other => panic!("expected quadratic, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_cubic_without_previous_uses_current_point() {
        let parsed = must(parse_path_data("M0 0 L 5 5 S 10 10 15 5"));
        match parsed.segments[1] {
            Segment::Cubic(cubic) => assert_eq!(cubic.control1, Point::new(5.0, 5.0)),
            other => panic!("expected cubic, got {:?}", other),
        }
    }

    #[test]
    fn test_arc_flags_without_separators() {
        let parsed = must(parse_path_data("M0 0 a10 10 0 0110 10"));
        assert_eq!(parsed.segments.len(), 1);
        assert_eq!(parsed.segments[0].end(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_close_path_adds_closing_line() {
        let parsed = must(parse_path_data("M0 0 L10 0 L10 10 Z"));
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(parsed.segments[2].end(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_close_path_at_start_adds_nothing() {
        let parsed = must(parse_path_data("M0 0 L10 0 L10 10 L0 0 z"));
        assert_eq!(parsed.segments.len(), 3);
    }

    #[test]
    fn test_relative_after_close_uses_subpath_start() {
        let parsed = must(parse_path_data("M5 5 l10 0 l0 10 z l1 1"));
        let last = parsed.segments.last().copied();
        assert_eq!(last.map(|s| s.end()), Some(Point::new(6.0, 6.0)));
    }

    #[test]
    fn test_subpath_count() {
        let parsed = must(parse_path_data("M0 0 L1 0 M5 5 L6 5 M9 9"));
        assert_eq!(parsed.subpaths, 2);
    }

    #[test]
    fn test_must_start_with_move() {
        assert_eq!(malformed_position(parse_path_data("  L 0 0")), 2);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(malformed_position(parse_path_data("M0 0 X 1 1")), 5);
    }

    #[test]
    fn test_missing_arguments() {
        let result = parse_path_data("M0 0 L");
        assert!(matches!(result, Err(GeometryError::MalformedPath { .. })));
    }

    #[test]
    fn test_incomplete_coordinate_pair() {
        let result = parse_path_data("M0 0 L 10");
        assert!(matches!(result, Err(GeometryError::MalformedPath { .. })));
    }

    #[test]
    fn test_invalid_arc_flag() {
        let result = parse_path_data("M0 0 A 5 5 0 2 1 10 0");
        match result {
            Err(GeometryError::MalformedPath { reason, .. }) => {
                assert!(reason.contains("arc flag"));
            }
            other => panic!("expected MalformedPath, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_characters() {
        let result = parse_path_data("M0 0 L 10 10 #");
        assert!(matches!(result, Err(GeometryError::MalformedPath { .. })));
    }

    #[test]
    fn test_empty_input_parses_to_nothing() {
        let parsed = must(parse_path_data("   "));
        assert!(parsed.segments.is_empty());
        assert_eq!(parsed.subpaths, 0);
    }
}
