//! Title-screen style layouts built from a configured stage

use crate::config::SceneConfig;
use crate::scene::{PlacementOffset, Position2D, SceneNode, SceneTree};

#[test]
fn test_title_screen_layout() {
    let mut tree = SceneTree::with_config(&SceneConfig::default());
    let stage = tree.stage().unwrap();

    let hero = tree.insert(SceneNode::new().with_name("hero").with_size(64.0, 96.0));
    let title = tree.insert(SceneNode::new().with_name("title").with_size(200.0, 40.0));
    let prompt = tree.insert(SceneNode::new().with_name("prompt").with_size(120.0, 16.0));
    tree.add(stage, &[hero, title, prompt]).unwrap();

    tree.put_center(stage, hero, PlacementOffset::default()).unwrap();
    tree.put_top(hero, title, PlacementOffset::new(0.0, -8.0)).unwrap();
    tree.put_bottom(hero, prompt, PlacementOffset::new(0.0, 8.0)).unwrap();

    assert_eq!(tree.node(hero).unwrap().position(), Position2D { x: 288.0, y: 132.0 });
    assert_eq!(tree.node(title).unwrap().position(), Position2D { x: 220.0, y: 84.0 });
    assert_eq!(tree.node(prompt).unwrap().position(), Position2D { x: 260.0, y: 236.0 });

    let order = tree.draw_order(stage).unwrap();
    assert_eq!(order, vec![stage, hero, title, prompt]);
}

#[test]
fn test_layer_change_moves_sprite_to_back() {
    let mut tree = SceneTree::with_config(&SceneConfig::default());
    let stage = tree.stage().unwrap();
    let sky = tree.create_node();
    let ground = tree.create_node();
    let player = tree.create_node();
    tree.add(stage, &[player, ground, sky]).unwrap();

    tree.set_layer(sky, -2).unwrap();
    tree.set_layer(ground, -1).unwrap();

    assert_eq!(tree.children(stage).unwrap(), &[sky, ground, player]);

    tree.swap_children(stage, sky, player).unwrap();
    assert_eq!(tree.children(stage).unwrap(), &[player, ground, sky]);
    // swapping does not touch layers
    assert_eq!(tree.node(sky).unwrap().layer(), -2);
}

#[test]
fn test_row_of_sprites_with_put_right() {
    let mut tree = SceneTree::new();
    let tiles: Vec<_> = (0..4)
        .map(|_| tree.insert(SceneNode::new().with_size(16.0, 16.0)))
        .collect();

    for pair in tiles.windows(2) {
        tree.put_right(pair[0], pair[1], PlacementOffset::new(2.0, 0.0)).unwrap();
    }

    let xs: Vec<f32> = tiles.iter().map(|&id| tree.node(id).unwrap().x).collect();
    assert_eq!(xs, vec![0.0, 18.0, 36.0, 54.0]);
}
