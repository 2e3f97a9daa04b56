use avl_collections::avl_tree::{traversal, AvlTree};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;

fn log_level() -> LevelFilter {
    env::var("AVL_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn main() -> avl_collections::Result<()> {
    if let Err(err) = TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", err);
    }

    let mut tree = AvlTree::new();
    for value in 1..=7 {
        tree.add(value)?;
    }
    info!("built {:?} with height {:?}", tree, tree.height());

    let mut levels = Vec::new();
    traversal::visit_level_order(tree.root(), |value| levels.push(*value));
    info!("level order: {:?}", levels);
    info!("preorder: {:?}", traversal::preorder(tree.root()).collect::<Vec<_>>());
    info!("postorder: {:?}", traversal::postorder(tree.root()).collect::<Vec<_>>());

    tree.remove(&6)?;
    let remaining: Vec<u32> = tree
        .root()
        .map(|root| root.level_order().cloned().collect())
        .unwrap_or_default();
    info!("after removing 6: level order {:?}", remaining);
    Ok(())
}
