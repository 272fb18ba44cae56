use std::sync::Arc;

use crate::descriptor::{GameDescriptor, GameInfo};
use crate::loader::{ComponentResolver, resolver_loader};
use crate::registry::GameRegistry;

/// The built-in game table: (display name, component id, description), in
/// menu order. 扫雷 has been the first entry since the catalog shipped with
/// three games; later additions only append.
const BUILTIN_GAMES: [(&str, &str, &str); 7] = [
    (
        "扫雷",
        "Minesweeper",
        "一个简单的扫雷游戏。鼠标右键标记雷💣，双击查看周围区域。",
    ),
    (
        "贪吃蛇",
        "SnakeGame",
        "一个简单的贪吃蛇游戏。通过键盘方向键（上下左右）控制方向。",
    ),
    (
        "2048",
        "Game2048",
        "一个简单的2048游戏，通过键盘方向键（上下左右）移动数字，相同数字会合并并累加分数。",
    ),
    (
        "数独",
        "Sudoku",
        "一个简单的数独游戏，在九宫格中填入 1-9，每行、每列、每个宫内数字不能重复。",
    ),
    (
        "记忆翻牌",
        "MemoryGame",
        "一个简单的记忆翻牌游戏，翻开两张相同的卡片即可消除，全部配对成功即获胜。",
    ),
    (
        "迷宫",
        "MazeGame",
        "一个简单的迷宫游戏，通过键盘方向键（上下左右）移动，从起点走到终点。",
    ),
    ("测试", "TestGame", "用于开发调试的测试页面。"),
];

/// Display metadata for the built-in games, in menu order.
pub fn builtin_infos() -> Vec<GameInfo> {
    BUILTIN_GAMES
        .iter()
        .map(|&(name, component, description)| GameInfo::new(name, component, description))
        .collect()
}

/// Build the built-in catalog, wiring every entry's loader to `resolver`.
///
/// Construction is cheap: nothing is fetched until a descriptor's
/// `load_component()` is invoked.
pub fn builtin(resolver: Arc<dyn ComponentResolver>) -> GameRegistry {
    let games: Vec<GameDescriptor> = builtin_infos()
        .into_iter()
        .map(|info| {
            let loader = resolver_loader(&resolver, info.component.clone());
            GameDescriptor::new(info, loader)
        })
        .collect();
    GameRegistry::new(games).expect("built-in catalog must have unique component ids")
}
