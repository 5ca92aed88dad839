use crate::engine::rules::Rules;
use crate::engine::types::{Color, Square};

use super::eval::{evaluate, terminal_score};
use super::limits::{SearchAbort, SearchContext};
use super::{INF, MAX_DEPTH};

/// ルート探索。選んだ手と、その評価値（`color` 視点）を返す。
///
/// - 合法手が無ければ `(None, 静的評価)`。
/// - `depth <= 0` なら展開せず、最初の合法手と静的評価を返す。
pub(super) fn root<R: Rules>(
    board: R,
    color: Color,
    depth: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<(Option<Square>, i32), SearchAbort> {
    if let Err(err) = ctx.enter() {
        return Err(err);
    }

    let mut moves = board.legal_moves(color);
    if moves.is_empty() {
        let score = if board.legal_moves(color.opponent()).is_empty() {
            terminal_score(board, color)
        } else {
            evaluate(board, color)
        };
        return Ok((None, score));
    }

    if depth <= 0 {
        return Ok((moves.next(), evaluate(board, color)));
    }

    let clamped = u8::try_from(depth).unwrap_or(MAX_DEPTH).min(MAX_DEPTH);
    let next_depth = clamped.saturating_sub(1);
    let mut best_move: Option<Square> = None;
    let mut best_score = i32::MIN;
    let mut alpha = INF.wrapping_neg();
    let beta = INF;

    for mv in moves {
        let Ok(next) = board.apply_move(mv, color) else {
            continue;
        };
        let score = match negamax(
            next,
            color.opponent(),
            next_depth,
            beta.wrapping_neg(),
            alpha.wrapping_neg(),
            ctx,
        ) {
            Ok(value) => value.wrapping_neg(),
            Err(err) => return Err(err),
        };

        // 同点なら先に見つけた手を残す
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok((best_move, best_score))
}

/// ネガマックス（αβ付き、fail-soft）。評価値は `to_move` 視点。
pub(super) fn negamax<R: Rules>(
    board: R,
    to_move: Color,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchAbort> {
    if let Err(err) = ctx.enter() {
        return Err(err);
    }

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        let opponent = to_move.opponent();
        if board.legal_moves(opponent).is_empty() {
            return Ok(terminal_score(board, to_move));
        }
        if depth == 0 {
            return Ok(evaluate(board, to_move));
        }

        // パス：盤面はそのまま、相手番で1手分深さを消費する。
        ctx.stats_mut().inc_passes();
        return match negamax(
            board,
            opponent,
            depth.saturating_sub(1),
            beta.wrapping_neg(),
            alpha.wrapping_neg(),
            ctx,
        ) {
            Ok(value) => Ok(value.wrapping_neg()),
            Err(err) => Err(err),
        };
    }

    if depth == 0 {
        return Ok(evaluate(board, to_move));
    }

    let next_depth = depth.saturating_sub(1);
    let mut best = i32::MIN;

    for mv in moves {
        let Ok(next) = board.apply_move(mv, to_move) else {
            continue;
        };
        let score = match negamax(
            next,
            to_move.opponent(),
            next_depth,
            beta.wrapping_neg(),
            alpha.wrapping_neg(),
            ctx,
        ) {
            Ok(value) => value.wrapping_neg(),
            Err(err) => return Err(err),
        };
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            ctx.stats_mut().inc_cutoffs();
            break;
        }
    }

    Ok(best)
}
