use std::time::Duration;

use crate::towers::{Move, PegId};

/// Delay strategy between animated moves.
///
/// `Pacing::None` keeps solver runs free of wall-clock cost in tests,
/// `Pacing::Fixed` is the interactive default.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pacing {
    None,
    Fixed(Duration),
}

impl Pacing {
    /// Block for the configured delay, if any.
    pub fn pause(self) {
        match self {
            Pacing::None => {}
            Pacing::Fixed(delay) => std::thread::sleep(delay),
        }
    }
}

/// The optimal number of moves for `nr_disks` disks, 2^n - 1.
///
/// Saturates at `u64::MAX` so the value can be shown for any requested disk
/// count.
pub fn optimal_nr_moves(nr_disks: u32) -> u64 {
    match 1u64.checked_shl(nr_disks) {
        Some(total) => total - 1,
        None => u64::MAX,
    }
}

/// Emit the optimal move sequence for `nr_disks` disks from `src` to `dst`,
/// using `aux` as the free peg.
///
/// `on_move` is called exactly once per move, in order, with 1-based move
/// numbers. An error from the callback aborts the remaining moves.
pub fn solve<F>(
    nr_disks: u32,
    src: PegId,
    aux: PegId,
    dst: PegId,
    mut on_move: F,
) -> anyhow::Result<()>
where
    F: FnMut(Move, u64) -> anyhow::Result<()>,
{
    let mut nr_moves = 0;
    solve_inner(nr_disks, src, aux, dst, &mut nr_moves, &mut on_move)
}

fn solve_inner<F>(
    nr_disks: u32,
    src: PegId,
    aux: PegId,
    dst: PegId,
    nr_moves: &mut u64,
    on_move: &mut F,
) -> anyhow::Result<()>
where
    F: FnMut(Move, u64) -> anyhow::Result<()>,
{
    if nr_disks == 0 {
        return Ok(());
    }

    // everything above the bottom disk goes to the free peg first
    solve_inner(nr_disks - 1, src, dst, aux, nr_moves, on_move)?;

    *nr_moves += 1;
    let mv = Move { src, dst };
    log::debug!("move {nr_moves}: {mv}");
    on_move(mv, *nr_moves)?;

    solve_inner(nr_disks - 1, aux, src, dst, nr_moves, on_move)
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use proptest::proptest;

    use crate::towers::Towers;

    use super::*;

    fn collect_moves(nr_disks: u32) -> Vec<(Move, u64)> {
        let mut moves = vec![];
        solve(nr_disks, PegId::A, PegId::B, PegId::C, |mv, nr| {
            moves.push((mv, nr));
            Ok(())
        })
        .unwrap();
        moves
    }

    #[test]
    fn test_zero_disks_emits_no_moves() {
        assert!(collect_moves(0).is_empty());
    }

    #[test]
    fn test_single_disk_goes_straight_to_destination() {
        let moves = collect_moves(1);
        assert_eq!(
            moves,
            vec![(
                Move {
                    src: PegId::A,
                    dst: PegId::C,
                },
                1
            )]
        );
    }

    #[test]
    fn test_two_disk_sequence() {
        let moves: Vec<_> = collect_moves(2)
            .into_iter()
            .map(|(mv, _)| (mv.src, mv.dst))
            .collect();
        assert_eq!(
            moves,
            vec![
                (PegId::A, PegId::B),
                (PegId::A, PegId::C),
                (PegId::B, PegId::C),
            ]
        );
    }

    #[test]
    fn test_move_numbers_are_consecutive() {
        for (i, (_, nr)) in collect_moves(4).into_iter().enumerate() {
            assert_eq!(nr, i as u64 + 1);
        }
    }

    #[test]
    fn test_three_disks_end_on_destination() {
        let mut towers = Towers::new(3, PegId::A);
        solve(3, PegId::A, PegId::B, PegId::C, |mv, _| {
            towers.perform_move(mv)
        })
        .unwrap();

        assert_eq!(towers.peg(PegId::C).disks(), &[3, 2, 1]);
        assert!(towers.peg(PegId::A).disks().is_empty());
        assert!(towers.peg(PegId::B).disks().is_empty());
    }

    #[test]
    fn test_callback_error_aborts_solve() {
        let mut nr_calls = 0;
        let result = solve(3, PegId::A, PegId::B, PegId::C, |_, nr| {
            nr_calls += 1;
            if nr == 4 {
                bail!("stop here");
            }
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(nr_calls, 4, "no move should be emitted after the error");
    }

    #[test]
    fn test_optimal_nr_moves() {
        assert_eq!(optimal_nr_moves(0), 0);
        assert_eq!(optimal_nr_moves(1), 1);
        assert_eq!(optimal_nr_moves(2), 3);
        assert_eq!(optimal_nr_moves(3), 7);
        assert_eq!(optimal_nr_moves(10), 1023);
        assert_eq!(optimal_nr_moves(64), u64::MAX);
    }

    #[test]
    fn test_pacing_none_does_not_block() {
        let start = std::time::Instant::now();
        Pacing::None.pause();
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    proptest! {
        #[test]
        fn test_solve_is_optimal_and_keeps_ordering(nr_disks in 0u32..10) {
            let mut towers = Towers::new(nr_disks, PegId::A);
            let mut nr_seen = 0;

            solve(nr_disks, PegId::A, PegId::B, PegId::C, |mv, nr| {
                towers.perform_move(mv)?;
                assert!(towers.is_ordered(), "move {nr} ({mv}) broke the ordering");
                nr_seen = nr;
                Ok(())
            })
            .unwrap();

            assert_eq!(nr_seen, optimal_nr_moves(nr_disks));
            assert!(towers.is_complete(PegId::C));
        }
    }
}
