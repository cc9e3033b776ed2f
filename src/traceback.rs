//! Recover the matched window from a built route table.

use crate::table::{Route, Tables};
use crate::types::{MatchWindow, Pos};

/// Walk the route table back from the bottom-right cell until an `Unknown`
/// cell is reached.
///
/// The window starts as `(0, start) - (height-1, width-1)` and is tightened
/// while walking:
/// - a step left on the last row moves `end.col` to the column stepped into;
/// - a step up or diagonal onto the first row moves `start.col` to one less
///   than the column it was taken from.
///
/// The cost is read at `end`, not at the bottom-right cell.
///
/// When `trace` is set, the visited cells are stored in the window, ordered
/// from the first visited cell on the top row to the bottom-right corner.
pub fn extract(tables: &Tables, trace: bool) -> MatchWindow {
    let dims = tables.dims();
    let last = dims.last();
    let mut start = Pos::new(0, tables.start);
    let mut end = last;
    let mut path = trace.then(Vec::new);

    let mut pos = last;
    loop {
        if let Some(path) = &mut path {
            path.push(pos);
        }
        let Pos { row, col } = pos;
        match tables.route[pos] {
            Route::Unknown => break,
            Route::FromLeft => {
                if row == last.row {
                    end.col = col - 1;
                }
                pos = Pos::new(row, col - 1);
            }
            Route::FromUp => {
                if row - 1 == 0 && col > 0 {
                    start.col = col - 1;
                }
                pos = Pos::new(row - 1, col);
            }
            Route::FromDiagonal => {
                if row - 1 == 0 && col > 0 {
                    start.col = col - 1;
                }
                pos = Pos::new(row - 1, col - 1);
            }
        }
    }

    if let Some(path) = &mut path {
        path.reverse();
    }
    MatchWindow {
        start,
        end,
        cost: tables.cost[end],
        path,
    }
}
