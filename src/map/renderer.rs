use std::collections::HashSet;
use yew::Callback;

use super::direction::Direction;
use crate::model::{Project, Room};

/// Side of a room square, and the length of a drawn exit line. Neighbouring
/// rooms sit two gaps apart so a line never touches the next square.
pub const GAP: f64 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn step(self, (dx, dy): (f64, f64), distance: f64) -> Self {
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

/// One room as it is about to be drawn.
pub struct RoomGlyph<'a> {
    pub room: &'a Room,
    pub center: Point,
    pub size: f64,
    /// The room the walk started from.
    pub focused: bool,
}

/// Where the map ends up. Fills and lines go to a persistent drawing
/// surface; each room also gets a clickable overlay carrying its label.
pub trait MapSurface {
    /// Drop every overlay from the previous draw and re-attach the canvas.
    fn reset(&mut self);
    /// Current size of the hosting container.
    fn measure(&self) -> (f64, f64);
    /// Resize the drawing surface. Clears its pixels.
    fn resize(&mut self, width: f64, height: f64);
    fn fill_room(&mut self, glyph: &RoomGlyph<'_>);
    fn stroke_exit(&mut self, from: Point, to: Point);
    fn attach_room(&mut self, glyph: &RoomGlyph<'_>, on_click: Callback<Room>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rooms_drawn: usize,
    pub exits_drawn: usize,
    pub dangling_exits: usize,
    pub unknown_exits: usize,
}

pub struct MapRenderer<S: MapSurface> {
    surface: S,
    on_room_click: Callback<Room>,
    last_drawn: Option<Point>,
}

impl<S: MapSurface> MapRenderer<S> {
    pub fn initialize(surface: S, on_room_click: Callback<Room>) -> Self {
        Self {
            surface,
            on_room_click,
            last_drawn: None,
        }
    }

    pub fn set_on_room_click(&mut self, on_room_click: Callback<Room>) {
        self.on_room_click = on_room_click;
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Centre of the last room whose exits were walked in the latest draw.
    pub fn last_drawn(&self) -> Option<Point> {
        self.last_drawn
    }

    /// Redraw the map around `start`. Never fails: missing rooms, unknown
    /// directions and cycles only shorten the drawing.
    pub fn show<'p>(&mut self, project: &'p Project, start: Option<&'p Room>) -> RenderStats {
        self.surface.reset();
        let (width, height) = self.surface.measure();
        self.surface.resize(width, height);
        let Some(start) = start else {
            self.last_drawn = None;
            return RenderStats::default();
        };
        let mut walk = Walk {
            project,
            surface: &mut self.surface,
            on_click: &self.on_room_click,
            start: &start.id,
            visited: HashSet::new(),
            last: None,
            stats: RenderStats::default(),
        };
        walk.visit(start, Point::new(width / 2.0, height / 2.0));
        self.last_drawn = walk.last;
        walk.stats
    }
}

/// Traversal context of one `show` call.
struct Walk<'p, 's, S: MapSurface> {
    project: &'p Project,
    surface: &'s mut S,
    on_click: &'s Callback<Room>,
    start: &'p str,
    visited: HashSet<&'p str>,
    last: Option<Point>,
    stats: RenderStats,
}

impl<'p, S: MapSurface> Walk<'p, '_, S> {
    fn visit(&mut self, room: &'p Room, at: Point) {
        if !self.visited.insert(room.id.as_str()) {
            return;
        }
        let glyph = RoomGlyph {
            room,
            center: at,
            size: GAP,
            focused: room.id == self.start,
        };
        self.surface.fill_room(&glyph);
        self.surface.attach_room(&glyph, self.on_click.clone());
        self.stats.rooms_drawn += 1;

        if room.exits.is_empty() {
            return;
        }
        for exit in &room.exits {
            let Some(direction) = Direction::from_name(&exit.direction) else {
                log::debug!("room {}: ignoring exit '{}'", room.id, exit.direction);
                self.stats.unknown_exits += 1;
                continue;
            };
            let offset = direction.offset();
            self.surface.stroke_exit(at, at.step(offset, GAP));
            self.stats.exits_drawn += 1;
            match self.project.room(&exit.target) {
                Some(next) => self.visit(next, at.step(offset, 2.0 * GAP)),
                None => {
                    log::debug!(
                        "room {}: {direction} exit leads to missing room {}",
                        room.id,
                        exit.target
                    );
                    self.stats.dangling_exits += 1;
                }
            }
        }
        self.last = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load_document;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Overlay {
        room: Room,
        center: Point,
        focused: bool,
        on_click: Callback<Room>,
    }

    impl Overlay {
        fn click(&self) {
            self.on_click.emit(self.room.clone());
        }
    }

    #[derive(Default)]
    struct Recorder {
        size: (f64, f64),
        resets: usize,
        fills: Vec<Point>,
        lines: Vec<(Point, Point)>,
        overlays: Vec<Overlay>,
    }

    impl Recorder {
        fn sized(width: f64, height: f64) -> Self {
            Self {
                size: (width, height),
                ..Default::default()
            }
        }

        fn ids(&self) -> Vec<&str> {
            self.overlays.iter().map(|o| o.room.id.as_str()).collect()
        }

        fn center_of(&self, id: &str) -> Option<Point> {
            self.overlays.iter().find(|o| o.room.id == id).map(|o| o.center)
        }
    }

    impl MapSurface for Recorder {
        fn reset(&mut self) {
            self.resets += 1;
            self.overlays.clear();
        }
        fn measure(&self) -> (f64, f64) {
            self.size
        }
        fn resize(&mut self, width: f64, height: f64) {
            self.size = (width, height);
            self.fills.clear();
            self.lines.clear();
        }
        fn fill_room(&mut self, glyph: &RoomGlyph<'_>) {
            self.fills.push(glyph.center);
        }
        fn stroke_exit(&mut self, from: Point, to: Point) {
            self.lines.push((from, to));
        }
        fn attach_room(&mut self, glyph: &RoomGlyph<'_>, on_click: Callback<Room>) {
            self.overlays.push(Overlay {
                room: glyph.room.clone(),
                center: glyph.center,
                focused: glyph.focused,
                on_click,
            });
        }
    }

    fn renderer() -> (MapRenderer<Recorder>, Rc<RefCell<Vec<Room>>>) {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let r = MapRenderer::initialize(
            Recorder::sized(400.0, 300.0),
            Callback::from(move |room: Room| sink.borrow_mut().push(room)),
        );
        (r, clicks)
    }

    fn project(rooms: Vec<Room>) -> Project {
        Project {
            rooms,
            ..Default::default()
        }
    }

    #[test]
    fn two_room_cycle_draws_each_once() {
        let p = load_document(
            "rooms:\n  - id: start\n    exits: {north: cave}\n  - id: cave\n    exits: {south: start}\n",
        )
        .unwrap();
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.rooms_drawn, 2);
        assert_eq!(stats.exits_drawn, 2);
        let s = r.surface();
        assert_eq!(s.ids(), vec!["start", "cave"]);
        assert_eq!(s.center_of("start"), Some(Point::new(200.0, 150.0)));
        assert_eq!(s.center_of("cave"), Some(Point::new(200.0, 150.0 - 2.0 * GAP)));
        assert_eq!(
            s.lines,
            vec![
                (Point::new(200.0, 150.0), Point::new(200.0, 150.0 - GAP)),
                (Point::new(200.0, 60.0), Point::new(200.0, 60.0 + GAP)),
            ]
        );
        assert!(s.overlays[0].focused);
        assert!(!s.overlays[1].focused);
    }

    #[test]
    fn only_reachable_rooms_are_drawn() {
        let p = project(vec![
            Room::new("a").with_exit("east", "b"),
            Room::new("b").with_exit("southeast", "c"),
            Room::new("c"),
            Room::new("island").with_exit("west", "a"),
        ]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.room("a"));
        assert_eq!(stats.rooms_drawn, 3);
        assert_eq!(r.surface().ids(), vec!["a", "b", "c"]);
        assert_eq!(r.surface().fills.len(), 3);
        assert_eq!(r.surface().center_of("c"), Some(Point::new(380.0, 240.0)));
    }

    #[test]
    fn self_loop_draws_one_edge() {
        let p = project(vec![Room::new("loop").with_exit("north", "loop")]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.rooms_drawn, 1);
        assert_eq!(stats.exits_drawn, 1);
        assert_eq!(r.surface().lines.len(), 1);
        assert_eq!(r.surface().lines[0].0, Point::new(200.0, 150.0));
    }

    #[test]
    fn dangling_exit_draws_edge_only() {
        let p = project(vec![Room::new("a").with_exit("west", "nowhere")]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.rooms_drawn, 1);
        assert_eq!(stats.dangling_exits, 1);
        assert_eq!(
            r.surface().lines,
            vec![(Point::new(200.0, 150.0), Point::new(155.0, 150.0))]
        );
    }

    #[test]
    fn unknown_direction_is_ignored() {
        let p = project(vec![
            Room::new("a").with_exit("up", "b").with_exit("down", "b"),
            Room::new("b"),
        ]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.unknown_exits, 2);
        assert_eq!(stats.rooms_drawn, 1);
        assert!(r.surface().lines.is_empty());
    }

    #[test]
    fn room_reached_twice_keeps_first_position() {
        let p = project(vec![
            Room::new("a").with_exit("east", "b").with_exit("south", "b"),
            Room::new("b"),
        ]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.rooms_drawn, 2);
        assert_eq!(stats.exits_drawn, 2);
        assert_eq!(r.surface().center_of("b"), Some(Point::new(290.0, 150.0)));
    }

    #[test]
    fn no_start_room_draws_nothing() {
        let p = Project::default();
        let (mut r, _) = renderer();
        assert_eq!(r.show(&p, None), RenderStats::default());
        assert!(r.surface().overlays.is_empty());
        assert_eq!(r.surface().resets, 1);
        assert_eq!(r.last_drawn(), None);
    }

    #[test]
    fn click_reports_whole_room_once() {
        let p = load_document(
            "rooms:\n  - id: start\n    name: Hangar\n    desc: Cold.\n    exits: {east: bay}\n  - id: bay\n",
        )
        .unwrap();
        let (mut r, clicks) = renderer();
        r.show(&p, p.first_room());
        r.surface().overlays[0].click();
        assert_eq!(*clicks.borrow(), vec![p.rooms[0].clone()]);
        r.surface().overlays[1].click();
        assert_eq!(clicks.borrow().len(), 2);
        assert_eq!(clicks.borrow()[1], p.rooms[1]);
    }

    #[test]
    fn replaced_callback_receives_later_clicks() {
        let p = project(vec![Room::new("a")]);
        let (mut r, old) = renderer();
        let fresh = Rc::new(RefCell::new(0));
        let sink = fresh.clone();
        r.set_on_room_click(Callback::from(move |_| *sink.borrow_mut() += 1));
        r.show(&p, p.first_room());
        r.surface().overlays[0].click();
        assert_eq!(*fresh.borrow(), 1);
        assert!(old.borrow().is_empty());
    }

    #[test]
    fn second_show_replaces_first() {
        let p = project(vec![
            Room::new("a").with_exit("north", "b"),
            Room::new("b").with_exit("north", "c"),
            Room::new("c"),
        ]);
        let (mut r, _) = renderer();
        r.show(&p, p.room("a"));
        assert_eq!(r.surface().overlays.len(), 3);
        r.show(&p, p.room("c"));
        assert_eq!(r.surface().ids(), vec!["c"]);
        assert_eq!(r.surface().fills.len(), 1);
        assert_eq!(r.surface().resets, 2);
        assert_eq!(r.surface().center_of("c"), Some(Point::new(200.0, 150.0)));
    }

    #[test]
    fn show_is_repeatable() {
        let p = project(vec![
            Room::new("a").with_exit("north", "b"),
            Room::new("b").with_exit("south", "a"),
        ]);
        let (mut r, _) = renderer();
        let first = r.show(&p, p.first_room());
        let second = r.show(&p, p.first_room());
        assert_eq!(first, second);
        assert_eq!(r.surface().overlays.len(), 2);
    }

    #[test]
    fn larger_cycle_terminates() {
        let p = project(vec![
            Room::new("a").with_exit("east", "b"),
            Room::new("b").with_exit("south", "c"),
            Room::new("c").with_exit("west", "d"),
            Room::new("d").with_exit("north", "a").with_exit("northeast", "b"),
        ]);
        let (mut r, _) = renderer();
        let stats = r.show(&p, p.first_room());
        assert_eq!(stats.rooms_drawn, 4);
        assert_eq!(stats.exits_drawn, 5);
        assert_eq!(r.surface().center_of("d"), Some(Point::new(200.0, 240.0)));
        assert_eq!(r.last_drawn(), Some(Point::new(200.0, 150.0)));
    }
}
