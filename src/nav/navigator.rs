//! Tick-driven exploration and free-play navigation controller.

use log::{debug, info, warn};

use crate::config::NavConfig;
use crate::core::{Coord, Orientation, Position};
use crate::graph::{Junction, JunctionGraph, NodeId};

use super::backend::{Driver, SensorDirection};
use super::state::NavState;

/// Maze exploration and navigation state machine.
///
/// Depth-first exploration policy: at every junction the navigator
/// prefers an unexplored front exit, then right, then left; with nothing
/// left it turns back and retreats toward the nearest junction that still
/// has unexplored exits, using shortest paths over the map built so far.
/// Once the exploration stack runs empty the map is final and the
/// navigator idles in `Wait`, serving point-to-point requests posted
/// through the goal mailbox.
///
/// One call to [`Navigator::tick`] performs one bounded unit of work.
/// The driving loop owns the control rate; the navigator never sleeps or
/// blocks internally.
pub struct Navigator {
    config: NavConfig,
    state: NavState,
    graph: JunctionGraph,
    /// Depth-first path from the maze entrance to the robot, as node ids.
    stack: Vec<NodeId>,
    position: Position,
    orientation: Orientation,
    /// Calibrated corridor wall-detection threshold.
    wall_dist: f32,
    /// Odometer reading at the last junction registration or backtrack
    /// departure; arrival edge distances are measured against it.
    dist_mark: f32,
    /// Junction the robot last departed from.
    prev_node: Option<NodeId>,
    /// Odometer reading when junction centering began.
    creep_mark: Option<f32>,
    backtracking: bool,
    /// False while exploring; true once the map is complete and the
    /// navigator serves point-to-point requests.
    free_play: bool,
    /// Single-slot goal mailbox (producer side).
    goal_mailbox: Option<Position>,
    /// Goal currently being served, as a node id.
    active_goal: Option<NodeId>,
    /// Discovery cursor for [`Navigator::poll_new_node`].
    reported: usize,
}

impl Navigator {
    /// Create a navigator in the `Begin` state at the local origin,
    /// facing [`Orientation::North`].
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            state: NavState::Begin,
            graph: JunctionGraph::new(),
            stack: Vec::new(),
            position: Position::ORIGIN,
            orientation: Orientation::North,
            wall_dist: 0.0,
            dist_mark: 0.0,
            prev_node: None,
            creep_mark: None,
            backtracking: false,
            free_play: false,
            goal_mailbox: None,
            active_goal: None,
            reported: 0,
        }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NavConfig::default())
    }

    /// Current state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Dead-reckoned position, for display purposes.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current heading, for display purposes.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The junction graph built so far.
    pub fn graph(&self) -> &JunctionGraph {
        &self.graph
    }

    /// Depth of the exploration stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the navigator is idling in `Wait`.
    pub fn is_waiting(&self) -> bool {
        self.state == NavState::Wait
    }

    /// Whether the map is still being built.
    pub fn is_exploring(&self) -> bool {
        !self.free_play
    }

    /// Goal mailbox: single slot, set-once-until-consumed.
    ///
    /// Passing `Some(goal)` installs the goal only if the slot is empty —
    /// a pending request is never overwritten — and returns the slot
    /// content after the call. Passing `None` takes and clears the slot
    /// (the consumer side). The navigator consumes the slot itself while
    /// in `Wait`.
    pub fn set_goal(&mut self, goal: Option<Position>) -> Option<Position> {
        match goal {
            None => self.goal_mailbox.take(),
            Some(g) => {
                if self.goal_mailbox.is_none() {
                    self.goal_mailbox = Some(g);
                }
                self.goal_mailbox
            }
        }
    }

    /// Yield one newly discovered junction per poll, in discovery order.
    ///
    /// Compares the node collection against the cursor left by the
    /// previous call; external collaborators poll this between ticks to
    /// report nodes as they appear.
    pub fn poll_new_node(&mut self) -> Option<Junction> {
        if self.reported < self.graph.len() {
            let node = *self.graph.node(self.reported);
            self.reported += 1;
            Some(node)
        } else {
            None
        }
    }

    /// Perform one bounded unit of work: one motion primitive, one
    /// sensing decision or one state transition.
    pub fn tick<D: Driver>(&mut self, driver: &mut D) {
        match self.state {
            NavState::Begin => self.initialize(driver),
            NavState::MoveToJunction => self.move_to_junction(driver),
            NavState::MoveOntoJunction => self.move_onto_junction(driver),
            NavState::HandleJunction => self.handle_junction(driver),
            NavState::OutOfJunctionLeft => self.out_of_junction(driver, SensorDirection::RearLeft),
            NavState::OutOfJunctionRight => {
                self.out_of_junction(driver, SensorDirection::RearRight)
            }
            NavState::Backtrack => self.backtrack(driver),
            NavState::Wait => self.wait(),
        }
    }

    // ── calibration ─────────────────────────────────────────────────────

    /// Derive the wall-detection threshold from the two forward-diagonal
    /// readings and the position tolerance band from half of it.
    fn initialize<D: Driver>(&mut self, driver: &mut D) {
        let left = driver.measure_distance(SensorDirection::FrontLeft);
        let right = driver.measure_distance(SensorDirection::FrontRight);
        self.wall_dist = (left + right) * self.config.wall_scale;
        Coord::set_tolerance(self.wall_dist * self.config.tolerance_fraction);

        info!(
            "calibrated: wall threshold {:.2}, position tolerance {:.2}",
            self.wall_dist,
            Coord::tolerance()
        );

        self.dist_mark = driver.odometer();
        self.state = NavState::HandleJunction;
    }

    // ── corridor following ──────────────────────────────────────────────

    fn move_to_junction<D: Driver>(&mut self, driver: &mut D) {
        // An empty stack during exploration means the maze is fully
        // mapped; suppressed once free play begins.
        if !self.free_play && self.stack.is_empty() {
            self.finish_exploration();
            return;
        }

        if !self.wall_right(driver) || !self.wall_left(driver) {
            // A side opened: the robot has reached a junction mouth.
            self.state = NavState::MoveOntoJunction;
            return;
        }

        if driver.touching_front_wall() {
            // Corridor dead end: turn around in place and retreat. Each
            // pivot may be blocked; an incomplete turn is retried on the
            // next tick after re-sensing.
            self.backtracking = true;
            if !self.pivot_right(driver) {
                return;
            }
            self.pivot_right(driver);
            return;
        }

        self.advance(driver);
    }

    /// Creep a calibrated fraction of the corridor width so the robot
    /// sits centred over the junction before exits are evaluated.
    fn move_onto_junction<D: Driver>(&mut self, driver: &mut D) {
        let start = *self.creep_mark.get_or_insert_with(|| driver.odometer());

        if driver.odometer() - start < self.wall_dist * self.config.creep_fraction {
            self.advance(driver);
        } else {
            self.creep_mark = None;
            self.state = NavState::HandleJunction;
        }
    }

    /// Advance through the junction mouth until the trailing wall on the
    /// side just exited reappears.
    fn out_of_junction<D: Driver>(&mut self, driver: &mut D, trailing: SensorDirection) {
        if self.detect_wall(driver, trailing) {
            self.state = NavState::MoveToJunction;
        }
        self.advance(driver);
    }

    // ── junction handling ───────────────────────────────────────────────

    fn handle_junction<D: Driver>(&mut self, driver: &mut D) {
        if let Some(goal) = self.active_goal {
            self.serve_goal(driver, goal);
            return;
        }

        if self.backtracking {
            self.state = NavState::Backtrack;
            return;
        }

        let (id, fresh) = self.register_junction(driver);

        // The exit the robot arrived through leads somewhere known now.
        let back = self.orientation.turn_back();
        self.graph.node_mut(id).exits_mut().mark_explored(back);

        let open_right = !self.wall_right(driver);
        let open_left = !self.wall_left(driver);
        let open_front = !self.detect_wall(driver, SensorDirection::Front);

        let heading = self.orientation;
        let exits = self.graph.node_mut(id).exits_mut();
        let unexplored_front = open_front && exits.discover(heading);
        let unexplored_right = open_right && exits.discover(heading.turn_right());
        let unexplored_left = open_left && exits.discover(heading.turn_left());

        if unexplored_front {
            exits.mark_explored(heading);
            debug!("junction {}: taking front exit {:?}", id, heading);
            self.depart(
                id,
                if open_right {
                    NavState::OutOfJunctionRight
                } else {
                    NavState::OutOfJunctionLeft
                },
            );
        } else if unexplored_right {
            self.pivot_right(driver);
            let dir = self.orientation;
            self.graph.node_mut(id).exits_mut().mark_explored(dir);
            debug!("junction {}: taking right exit {:?}", id, dir);
            self.depart(id, NavState::OutOfJunctionRight);
        } else if unexplored_left {
            self.pivot_left(driver);
            let dir = self.orientation;
            self.graph.node_mut(id).exits_mut().mark_explored(dir);
            debug!("junction {}: taking left exit {:?}", id, dir);
            self.depart(id, NavState::OutOfJunctionLeft);
        } else {
            // Every exit explored: turn around and retreat. A node pushed
            // this very visit has nothing left to offer and comes off the
            // stack immediately.
            debug!("junction {}: exhausted, turning back", id);
            self.backtracking = true;
            if fresh {
                self.stack.pop();
            }
            self.turn_back_in_place(driver);
            let next = if !self.wall_right(driver) {
                NavState::OutOfJunctionRight
            } else {
                NavState::OutOfJunctionLeft
            };
            self.depart(id, next);
        }
    }

    /// Register the junction under the robot: create it if unseen, and
    /// record the arrival edge from the previously departed junction.
    fn register_junction<D: Driver>(&mut self, driver: &mut D) -> (NodeId, bool) {
        let travel = driver.odometer() - self.dist_mark;

        let (id, fresh) = match self.graph.find(self.position) {
            Some(id) => (id, false),
            None => {
                let pushed = self.graph.push_node(Junction::new(self.position));
                assert!(pushed, "tolerant lookup and push disagree");
                let id = self.graph.len() - 1;
                self.stack.push(id);
                info!(
                    "junction {} discovered at ({:.1}, {:.1})",
                    id,
                    self.position.x.value(),
                    self.position.y.value()
                );
                driver.report_new_node(self.graph.node(id));
                (id, true)
            }
        };

        if let Some(prev) = self.prev_node {
            // A dead-end excursion returns to the junction it left;
            // there is no self-edge to record.
            if prev != id {
                debug!("edge {} ↔ {} = {:.1}", prev, id, travel);
                self.graph.add_distance(prev, id, travel);
            }
        }
        self.dist_mark = driver.odometer();

        (id, fresh)
    }

    /// Leave the current junction through the already-chosen exit.
    fn depart(&mut self, id: NodeId, out_state: NavState) {
        self.prev_node = Some(id);
        self.state = out_state;
    }

    // ── backtracking ────────────────────────────────────────────────────

    fn backtrack<D: Driver>(&mut self, driver: &mut D) {
        let cur = self
            .graph
            .find(self.position)
            .expect("backtracking from an unmapped position");

        // Standing on the stack top with work left: resume exploring.
        if self.stack.last() == Some(&cur) && self.graph.node(cur).exits().has_unexplored() {
            self.backtracking = false;
            self.state = NavState::HandleJunction;
            return;
        }

        // The graph grew since the last relaxation.
        self.graph.floyd_warshall();

        if self.stack.last() == Some(&cur) {
            self.stack.pop();
        }
        // Fold every junction that has nothing left to offer; the robot
        // only travels toward stack entries that still hold unexplored
        // exits.
        while let Some(&top) = self.stack.last() {
            if self.graph.node(top).exits().has_unexplored() {
                break;
            }
            self.stack.pop();
        }

        let Some(&target) = self.stack.last() else {
            self.finish_exploration();
            return;
        };

        if target == cur {
            self.backtracking = false;
            self.state = NavState::HandleJunction;
            return;
        }

        // Steer one hop along the shortest path toward the target; the
        // path is re-derived at every junction on the way.
        let hops = self.graph.path(cur, target);
        assert!(!hops.is_empty(), "backtrack target unreachable");
        self.steer_toward(driver, cur, hops[0]);

        self.prev_node = Some(cur);
        self.dist_mark = driver.odometer();
        self.state = if !self.wall_right(driver) {
            NavState::OutOfJunctionRight
        } else {
            NavState::OutOfJunctionLeft
        };
    }

    fn finish_exploration(&mut self) {
        self.graph.floyd_warshall();
        self.backtracking = false;
        self.free_play = true;
        self.creep_mark = None;
        self.state = NavState::Wait;
        info!("exploration complete: {} junctions mapped", self.graph.len());
    }

    // ── free play ───────────────────────────────────────────────────────

    fn serve_goal<D: Driver>(&mut self, driver: &mut D, goal: NodeId) {
        let cur = self
            .graph
            .find(self.position)
            .expect("free-play position must resolve to a junction");

        let hops = self.graph.path(cur, goal);
        if hops.is_empty() {
            // Arrived, or the goal is unreachable; either way the
            // request is done.
            info!("goal {} served (at junction {})", goal, cur);
            self.active_goal = None;
            self.state = NavState::Wait;
            return;
        }

        self.steer_toward(driver, cur, hops[0]);
        self.state = if !self.wall_right(driver) {
            NavState::OutOfJunctionRight
        } else {
            NavState::OutOfJunctionLeft
        };
    }

    fn wait(&mut self) {
        if let Some(goal) = self.set_goal(None) {
            match self.graph.find(goal) {
                Some(id) => {
                    info!("goal accepted: junction {}", id);
                    self.active_goal = Some(id);
                    self.state = NavState::HandleJunction;
                }
                None => warn!(
                    "ignoring goal at unmapped position ({:.1}, {:.1})",
                    goal.x.value(),
                    goal.y.value()
                ),
            }
        }
    }

    // ── motion and sensing helpers ──────────────────────────────────────

    /// Turn to face the orthogonally adjacent junction `to`.
    ///
    /// Edges only connect grid-adjacent junctions, so exactly one axis
    /// differs (tolerantly) between the two positions.
    fn steer_toward<D: Driver>(&mut self, driver: &mut D, from: NodeId, to: NodeId) {
        let here = self.graph.node(from).position();
        let next = self.graph.node(to).position();

        let target = if here.x < next.x {
            Orientation::East
        } else if here.x > next.x {
            Orientation::West
        } else if here.y < next.y {
            Orientation::South
        } else if here.y > next.y {
            Orientation::North
        } else {
            panic!("adjacent junctions {} and {} coincide", from, to);
        };

        self.turn_to(driver, target);
    }

    /// Pivot until the robot faces `target` (at most two 90° turns).
    fn turn_to<D: Driver>(&mut self, driver: &mut D, target: Orientation) {
        match self.orientation.right_turns_to(target) {
            0 => {}
            1 => {
                self.pivot_right(driver);
            }
            2 => {
                self.pivot_right(driver);
                self.pivot_right(driver);
            }
            _ => {
                self.pivot_left(driver);
            }
        }
        if self.orientation != target {
            warn!("pivot blocked while steering toward {:?}", target);
        }
    }

    fn turn_back_in_place<D: Driver>(&mut self, driver: &mut D) {
        self.pivot_right(driver);
        self.pivot_right(driver);
    }

    fn advance<D: Driver>(&mut self, driver: &mut D) {
        let moved = driver.advance();
        self.position.advance(self.orientation, moved);
    }

    fn pivot_right<D: Driver>(&mut self, driver: &mut D) -> bool {
        let ok = driver.pivot_right();
        if ok {
            self.orientation = self.orientation.turn_right();
        }
        ok
    }

    fn pivot_left<D: Driver>(&mut self, driver: &mut D) -> bool {
        let ok = driver.pivot_left();
        if ok {
            self.orientation = self.orientation.turn_left();
        }
        ok
    }

    fn detect_wall<D: Driver>(&mut self, driver: &mut D, direction: SensorDirection) -> bool {
        driver.measure_distance(direction) < self.wall_dist
    }

    fn wall_right<D: Driver>(&mut self, driver: &mut D) -> bool {
        self.detect_wall(driver, SensorDirection::FrontRight)
            || self.detect_wall(driver, SensorDirection::RearRight)
    }

    fn wall_left<D: Driver>(&mut self, driver: &mut D) -> bool {
        self.detect_wall(driver, SensorDirection::FrontLeft)
            || self.detect_wall(driver, SensorDirection::RearLeft)
    }
}
