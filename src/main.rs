use eight_puzzle::{solve, Game, Heuristic, Strategy};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut game = Game::new();
    game.shuffle();
    println!("Shuffled puzzle:\n{}", game.board());

    let strategies = [
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Misplaced),
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Greedy,
    ];

    for strategy in strategies {
        let result = solve(game.board(), strategy);
        match result.steps() {
            Some(steps) => println!(
                "{}: {} moves, {} nodes explored",
                strategy, steps, result.nodes_explored
            ),
            None => println!(
                "{}: no path within budget ({} nodes explored)",
                strategy, result.nodes_explored
            ),
        }
    }

    let result = solve(game.board(), Strategy::AStar(Heuristic::Manhattan));
    if let Some(path) = result.path {
        println!("\nOptimal solution, step by step:");
        for (step, board) in path.iter().enumerate() {
            println!("Step {}:\n{}", step, board);
        }
    }
}
