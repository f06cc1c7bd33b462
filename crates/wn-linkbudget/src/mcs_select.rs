use wn_types::{McsSelection, McsTable};

/// Per-link adaptive-MCS state machine. Holds the currently selected index
/// so repeated calls to [`McsSelector::select`] apply upgrade/downgrade
/// hysteresis against the *previous* choice rather than re-deriving a fresh
/// pick from SNR alone every time (which would flap at table thresholds).
#[derive(Debug, Default)]
pub struct McsSelector {
    current_index: Option<u32>,
}

impl McsSelector {
    pub fn new() -> Self {
        Self { current_index: None }
    }

    /// Select an MCS entry for `snr_db` against `table`, applying
    /// `hysteresis_db` margin per spec §4.1:
    /// - downgrading away from the current entry requires `snr_db` to fall
    ///   `hysteresis_db` below the current entry's threshold; otherwise hold
    ///   at the current entry, even if `snr_db` has dipped under it;
    /// - upgrading to a higher-index entry requires `snr_db` to clear that
    ///   entry's threshold by `hysteresis_db`.
    ///
    /// With no prior selection, the natural candidate for `snr_db` is
    /// chosen outright.
    pub fn select(&mut self, table: &McsTable, snr_db: f64, hysteresis_db: f64) -> McsSelection {
        let hysteresis_db = hysteresis_db.max(0.0);
        let natural = table.candidate_for(snr_db);

        let chosen = match self.current_index.and_then(|idx| table.by_index(idx)) {
            None => natural,
            Some(current) => {
                if snr_db < current.min_snr_db - hysteresis_db {
                    natural
                } else if natural.index > current.index && snr_db >= natural.min_snr_db + hysteresis_db {
                    natural
                } else {
                    current
                }
            }
        };

        self.current_index = Some(chosen.index);
        McsSelection {
            index: chosen.index,
            min_snr_db: chosen.min_snr_db,
            evaluated_snr_db: snr_db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_types::mcs::presets::wifi6_80mhz;

    #[test]
    fn first_selection_uses_natural_candidate() {
        let table = wifi6_80mhz();
        let mut selector = McsSelector::new();
        let sel = selector.select(&table, 22.0, 2.0);
        assert_eq!(sel.index, 7);
    }

    #[test]
    fn hysteresis_prevents_flapping_across_the_sample_sequence() {
        let table = wifi6_80mhz();
        let mut selector = McsSelector::new();
        // Index 7's threshold is 21.0; dropping to 19.0 is a dip of exactly
        // 2 dB, not past the 2 dB hysteresis margin, so index 7 holds
        // throughout instead of downgrading to index 6.
        let snrs = [22.0, 25.0, 24.0, 22.0, 19.0, 22.0];
        let selected: Vec<u32> = snrs.iter().map(|&s| selector.select(&table, s, 2.0).index).collect();
        assert_eq!(selected, vec![7, 7, 7, 7, 7, 7]);
    }

    #[test]
    fn downgrade_requires_breaching_the_hysteresis_margin() {
        let table = wifi6_80mhz();
        let mut selector = McsSelector::new();
        selector.select(&table, 22.0, 2.0); // index 7, threshold 21.0
        let held = selector.select(&table, 19.0, 2.0); // 21.0 - 2.0 = 19.0, not strictly below
        assert_eq!(held.index, 7);
        // Index 6's own threshold (19.0) coincides with the hysteresis floor,
        // so breaching it drops straight to whatever 18.99 dB naturally
        // supports (index 5), not index 6.
        let dropped = selector.select(&table, 18.99, 2.0);
        assert_eq!(dropped.index, 5);
    }

    #[test]
    fn downgrades_immediately_when_current_becomes_unsupportable() {
        let table = wifi6_80mhz();
        let mut selector = McsSelector::new();
        selector.select(&table, 30.0, 2.0);
        let sel = selector.select(&table, -10.0, 2.0);
        assert_eq!(sel.index, table.lowest().index);
    }
}
