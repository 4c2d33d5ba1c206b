//! Title scene demo
//!
//! Builds the title screen of a small game on a configured stage and logs the
//! resulting layout. Pass a `.toml` or `.ron` file to override the defaults:
//!
//! ```text
//! somegame somegame.toml
//! ```

use sprite_engine::foundation::logging;
use sprite_engine::prelude::*;

/// Handles to the sprites of the title scene
struct TitleScene {
    stage: NodeId,
    hero: NodeId,
    title_message: NodeId,
    wave: NodeId,
    shadow_blob: NodeId,
}

impl TitleScene {
    fn build(tree: &mut SceneTree, stage: NodeId) -> Result<Self, SceneError> {
        let hero = tree.create_node();
        {
            let node = tree.node_mut(hero)?;
            node.name = Some("insan".to_string());
            node.width = 48.0;
            node.height = 64.0;
            node.frames = vec!["insan_idle".to_string(), "insan_wave".to_string()];
            node.is_shadow = true;
            node.is_interactive = true;
        }

        let title_message = tree.create_node();
        {
            let node = tree.node_mut(title_message)?;
            node.name = Some("title_message".to_string());
            node.width = 240.0;
            node.height = 32.0;
        }

        let wave = tree.create_node();
        {
            let node = tree.node_mut(wave)?;
            node.name = Some("wave".to_string());
            node.width = 640.0;
            node.height = 48.0;
            node.alpha = 0.8;
            node.blend_mode = Some(BlendMode::Screen);
        }

        let shadow_blob = tree.create_node();
        {
            let node = tree.node_mut(shadow_blob)?;
            node.name = Some("shadow_blob".to_string());
            node.set_circular(true);
            node.set_radius(12.0)?;
            node.alpha = 0.4;
        }

        tree.add(stage, &[wave, hero, title_message])?;
        tree.add_child(hero, shadow_blob)?;

        tree.put_center(stage, hero, PlacementOffset::default())?;
        tree.put_top(hero, title_message, PlacementOffset::new(0.0, -16.0))?;
        tree.put_bottom(stage, wave, PlacementOffset::new(0.0, -48.0))?;

        // Child coordinates are local to the hero.
        let hero_size = tree.node(hero)?.size_2d();
        let blob = tree.node_mut(shadow_blob)?;
        blob.x = hero_size.width / 2.0 - blob.half_width();
        blob.y = hero_size.height - blob.half_height();

        tree.set_layer(wave, -1)?;
        tree.set_layer(shadow_blob, -1)?;
        tree.node_mut(hero)?.show_frame(1)?;

        Ok(Self {
            stage,
            hero,
            title_message,
            wave,
            shadow_blob,
        })
    }

    fn report(&self, tree: &SceneTree) -> Result<(), SceneError> {
        for id in [self.stage, self.wave, self.hero, self.title_message, self.shadow_blob] {
            let node = tree.node(id)?;
            let bounds = tree.global_bounds(id)?;
            log::info!(
                "{:<14} local ({:>6.1}, {:>6.1})  global ({:>6.1}, {:>6.1})  size {}x{}  layer {}",
                node.label(),
                node.x,
                node.y,
                bounds.x,
                bounds.y,
                node.width,
                node.height,
                node.layer()
            );
        }

        let order: Vec<&str> = tree
            .draw_order(self.stage)?
            .into_iter()
            .map(|id| tree.node(id).map(SceneNode::label))
            .collect::<Result<_, _>>()?;
        log::info!("Draw order: {}", order.join(" -> "));

        let blob = tree.node(self.shadow_blob)?;
        log::info!(
            "Shadow blob radius {:?}, stage-relative position {:?}",
            blob.radius(),
            tree.root_relative_position_3d(self.shadow_blob)?
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load_from_file(&path)?,
        None => SceneConfig::default(),
    };
    config.validate()?;

    logging::init_with_level(&config.log_level);
    log::info!(
        "Starting somegame on a {}x{} stage",
        config.stage.width,
        config.stage.height
    );

    let mut tree = SceneTree::with_config(&config);
    let stage = tree.stage().ok_or("stage node missing")?;
    let scene = TitleScene::build(&mut tree, stage)?;
    scene.report(&tree)?;

    log::info!("Title scene ready with {} nodes", tree.node_count());
    Ok(())
}
