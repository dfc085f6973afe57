//! Structural checks on decoded levels.

use super::layout::{BarLayout, DoubleLayout, Format, SingleLayout};
use crate::utils::error::CodecError;

/// Check that decoded `levels` describe a well-formed tree.
///
/// * every level is a whole number of nodes
/// * level 0 holds exactly one root spanning `[0, num_ticks)`
/// * offsets never decrease and siblings never overlap
/// * every node lies inside one node of the level above
/// * every name index points into the names table
pub fn validate_levels(
    levels: &[Vec<u64>],
    names: usize,
    num_ticks: u64,
    format: Format,
) -> Result<(), CodecError> {
    match format {
        Format::Single => validate_layout::<SingleLayout>(levels, names, num_ticks),
        Format::Double => validate_layout::<DoubleLayout>(levels, names, num_ticks),
    }
}

fn validate_layout<L: BarLayout>(
    levels: &[Vec<u64>],
    names: usize,
    num_ticks: u64,
) -> Result<(), CodecError> {
    if levels.is_empty() {
        return Err(CodecError::Empty);
    }
    if num_ticks == 0 {
        return Err(CodecError::ZeroTicks);
    }

    for (i, level) in levels.iter().enumerate() {
        if level.len() % L::STRIDE != 0 {
            return Err(CodecError::Misaligned {
                level: i,
                len: level.len(),
                stride: L::STRIDE,
            });
        }
    }

    let root = &levels[0];
    let roots = L::node_count(root);
    if roots != 1 {
        return Err(CodecError::InvalidRoot(roots));
    }
    let root_offset = L::offset(root, 0);
    let root_end = root_offset.saturating_add(L::total(root, 0));
    if root_offset != 0 || root_end != num_ticks {
        return Err(CodecError::RootMismatch {
            offset: root_offset,
            end: root_end,
            num_ticks,
        });
    }

    for (i, level) in levels.iter().enumerate() {
        check_names::<L>(i, level, names)?;
        check_siblings::<L>(i, level)?;
        if i > 0 {
            check_containment::<L>(i, &levels[i - 1], level)?;
        }
    }

    Ok(())
}

fn check_names<L: BarLayout>(i: usize, level: &[u64], names: usize) -> Result<(), CodecError> {
    for j in (0..level.len()).step_by(L::STRIDE) {
        let index = level[j + L::NAME_FIELD];
        if index >= names as u64 {
            return Err(CodecError::UnknownName {
                level: i,
                slot: j,
                index,
                names,
            });
        }
    }
    Ok(())
}

fn check_siblings<L: BarLayout>(i: usize, level: &[u64]) -> Result<(), CodecError> {
    let mut prev_end = 0u64;
    for j in (0..level.len()).step_by(L::STRIDE) {
        let offset = L::offset(level, j);
        if offset < prev_end {
            return Err(CodecError::NonMonotonic { level: i, slot: j });
        }
        prev_end = offset.saturating_add(L::total(level, j));
    }
    Ok(())
}

/// Both levels are sorted, so a single forward pass over the parents suffices
fn check_containment<L: BarLayout>(i: usize, parents: &[u64], level: &[u64]) -> Result<(), CodecError> {
    let mut p = 0;
    for j in (0..level.len()).step_by(L::STRIDE) {
        let offset = L::offset(level, j);
        let end = offset.saturating_add(L::total(level, j));

        while p < parents.len()
            && L::offset(parents, p).saturating_add(L::total(parents, p)) <= offset
        {
            p += L::STRIDE;
        }

        let contained = p < parents.len() && {
            let parent_offset = L::offset(parents, p);
            let parent_end = parent_offset.saturating_add(L::total(parents, p));
            parent_offset <= offset && end <= parent_end
        };
        if !contained {
            return Err(CodecError::Orphan { level: i, slot: j });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Vec<u64>> {
        vec![
            vec![0, 988, 0, 0],
            vec![0, 988, 0, 1],
            vec![0, 214, 0, 5, 214, 3, 2, 4, 217, 771, 0, 2],
            vec![0, 214, 214, 3, 216, 1, 1, 5, 217, 771, 771, 3],
        ]
    }

    #[test]
    fn test_valid_fixture() {
        assert_eq!(validate_levels(&fixture(), 6, 988, Format::Single), Ok(()));
    }

    #[test]
    fn test_root_must_span_num_ticks() {
        assert_eq!(
            validate_levels(&fixture(), 6, 1000, Format::Single),
            Err(CodecError::RootMismatch {
                offset: 0,
                end: 988,
                num_ticks: 1000
            })
        );
    }

    #[test]
    fn test_single_root_required() {
        let levels = vec![vec![0, 1, 0, 0, 1, 1, 0, 0]];
        assert_eq!(
            validate_levels(&levels, 1, 2, Format::Single),
            Err(CodecError::InvalidRoot(2))
        );
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            validate_levels(&fixture(), 5, 988, Format::Single),
            Err(CodecError::UnknownName { index: 5, .. })
        ));
    }

    #[test]
    fn test_overlapping_siblings() {
        let mut levels = fixture();
        levels[2][4] = 200;
        assert_eq!(
            validate_levels(&levels, 6, 988, Format::Single),
            Err(CodecError::NonMonotonic { level: 2, slot: 4 })
        );
    }

    #[test]
    fn test_node_outside_parent() {
        let mut levels = fixture();
        // child of main.fastFunction (0..214) now pokes into main.work
        levels[3][1] = 215;
        assert_eq!(
            validate_levels(&levels, 6, 988, Format::Single),
            Err(CodecError::Orphan { level: 3, slot: 0 })
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            validate_levels(&[], 1, 1, Format::Single),
            Err(CodecError::Empty)
        );
    }
}
