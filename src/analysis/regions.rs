/// Minimum-area filtering of 8-connected regions in a boolean selection mask.
///
/// Remove every 8-connected group of selected pixels whose pixel count is
/// strictly below `min_area`. Pixels of a rejected group are deselected
/// permanently; accepted groups are left selected and stay eligible for later
/// traces (re-encountering an accepted group redoes bounded work with an
/// identical outcome).
pub(crate) fn remove_small_regions(
    mask: &mut [bool],
    width: usize,
    height: usize,
    min_area: usize,
) {
    // Every group has at least one pixel, so thresholds of 0 or 1 cannot
    // reject anything.
    if min_area <= 1 {
        return;
    }

    // Eligibility grid: a pixel may seed or extend a trace only while its
    // entry is true. Cleared during a trace, restored for accepted groups.
    let mut open = vec![true; mask.len()];
    let mut member: Vec<usize> = Vec::new();
    let mut pending: Vec<usize> = Vec::new();

    for seed in 0..mask.len() {
        if !(mask[seed] && open[seed]) {
            continue;
        }

        // ── Trace one component, depth-first with an explicit stack ─────
        member.clear();
        pending.clear();
        member.push(seed);
        pending.push(seed);
        open[seed] = false;
        let mut count = 1usize;

        'trace: while let Some(current) = pending.pop() {
            let x = (current % width) as i64;
            let y = (current / width) as i64;

            for dy in -1_i64..=1 {
                for dx in -1_i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || nx >= width as i64 || ny < 0 || ny >= height as i64 {
                        continue;
                    }
                    let neighbor = ny as usize * width + nx as usize;
                    if mask[neighbor] && open[neighbor] {
                        open[neighbor] = false;
                        member.push(neighbor);
                        pending.push(neighbor);
                        count += 1;
                        // The exact size is not needed, only pass/fail:
                        // stop expanding as soon as the threshold is met.
                        if count >= min_area {
                            break 'trace;
                        }
                    }
                }
            }
        }

        if count < min_area {
            for &p in &member {
                mask[p] = false;
            }
        } else {
            for &p in &member {
                open[p] = true;
            }
        }
    }
}
