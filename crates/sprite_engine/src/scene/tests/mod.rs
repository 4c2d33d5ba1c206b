//! Scenario tests spanning tree, geometry and placement

mod layout_scenario;
