use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulation {
    Bpsk,
    Qpsk,
    Qam16,
    Qam64,
    Qam256,
    Qam1024,
    Qam4096,
}

impl Modulation {
    /// log2(M) bits carried per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        match self {
            Modulation::Bpsk => 1.0,
            Modulation::Qpsk => 2.0,
            Modulation::Qam16 => 4.0,
            Modulation::Qam64 => 6.0,
            Modulation::Qam256 => 8.0,
            Modulation::Qam1024 => 10.0,
            Modulation::Qam4096 => 12.0,
        }
    }

    /// Constellation size M.
    pub fn order(&self) -> f64 {
        2f64.powf(self.bits_per_symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecType {
    None,
    Turbo,
    Ldpc,
    Polar,
}

impl FecType {
    /// Conservative empirical coding-gain constants (dB), per spec §4.1.
    pub fn base_coding_gain_db(&self) -> f64 {
        match self {
            FecType::None => 0.0,
            FecType::Turbo => 5.5,
            FecType::Ldpc => 6.5,
            FecType::Polar => 6.0,
        }
    }
}

/// One row of an MCS table: `(index, modulation, code_rate, min_snr_db,
/// fec_type, bandwidth_mhz)`, plus optional spread-spectrum columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McsEntry {
    pub index: u32,
    pub modulation: Modulation,
    pub code_rate: f64,
    pub min_snr_db: f64,
    pub fec_type: FecType,
    pub bandwidth_mhz: f64,
    /// Spreading factor for spread-spectrum radios; divides the effective
    /// rate when present. `None` for OFDM-style entries.
    pub spreading_factor: Option<f64>,
}

/// A table of MCS entries, sorted ascending by `min_snr_db`; `index` is
/// monotonic with rate. Non-empty by construction (`McsTable::new` rejects an
/// empty vector) so the lowest-SNR entry is always a selectable fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McsTable {
    name: String,
    entries: Vec<McsEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum McsTableError {
    #[error("MCS table '{0}' must have at least one entry")]
    Empty(String),
}

impl McsTable {
    pub fn new(name: impl Into<String>, mut entries: Vec<McsEntry>) -> Result<Self, McsTableError> {
        let name = name.into();
        if entries.is_empty() {
            return Err(McsTableError::Empty(name));
        }
        entries.sort_by(|a, b| a.min_snr_db.partial_cmp(&b.min_snr_db).unwrap());
        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[McsEntry] {
        &self.entries
    }

    pub fn lowest(&self) -> &McsEntry {
        &self.entries[0]
    }

    pub fn by_index(&self, index: u32) -> Option<&McsEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Highest entry whose `min_snr_db <= snr_db`, falling back to the
    /// lowest entry if none qualify (spec: "lowest-SNR entry is always
    /// selectable as a fallback").
    pub fn candidate_for(&self, snr_db: f64) -> &McsEntry {
        self.entries
            .iter()
            .rev()
            .find(|e| e.min_snr_db <= snr_db)
            .unwrap_or_else(|| self.lowest())
    }
}

/// Result of an MCS selection: chosen entry plus the SNR it was evaluated
/// against, for reporting in the deployment summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct McsSelection {
    pub index: u32,
    pub min_snr_db: f64,
    pub evaluated_snr_db: f64,
}

/// An interface's modulation configuration: either fixed (modulation +
/// code-rate + FEC pinned), or adaptive (a named MCS table registered with
/// the channel service, selected via hysteresis at each compute). Untagged
/// so the YAML descriptor can write either shape directly under `wireless`,
/// per spec §6 ("either `{ modulation, fec_type, fec_code_rate }` or
/// `{ mcs_table, mcs_hysteresis_db }`").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModulationConfig {
    Fixed { modulation: Modulation, fec_code_rate: f64, fec_type: FecType },
    Adaptive { mcs_table: String, mcs_hysteresis_db: f64 },
}

impl ModulationConfig {
    pub fn default_hysteresis_db() -> f64 {
        2.0
    }
}

pub mod presets {
    use super::*;

    /// WiFi-6-like adaptive table: BPSK through 1024-QAM, LDPC, rate-1/2 to
    /// 5/6, 80 MHz channels. Mirrors the teacher's `Presets` catalog of named
    /// configurations in spirit (a handful of representative rows, not an
    /// exhaustive 802.11ax MCS table).
    pub fn wifi6_80mhz() -> McsTable {
        let rows = [
            (0, Modulation::Bpsk, 0.5, -4.0),
            (1, Modulation::Qpsk, 0.5, 2.0),
            (2, Modulation::Qpsk, 0.75, 5.0),
            (3, Modulation::Qam16, 0.5, 9.0),
            (4, Modulation::Qam16, 0.75, 12.0),
            (5, Modulation::Qam64, 0.667, 16.0),
            (6, Modulation::Qam64, 0.75, 19.0),
            (7, Modulation::Qam64, 0.833, 21.0),
            (8, Modulation::Qam256, 0.75, 24.0),
            (9, Modulation::Qam256, 0.833, 27.0),
            (10, Modulation::Qam1024, 0.75, 30.0),
            (11, Modulation::Qam1024, 0.833, 33.0),
        ];
        let entries = rows
            .into_iter()
            .map(|(index, modulation, code_rate, min_snr_db)| McsEntry {
                index,
                modulation,
                code_rate,
                min_snr_db,
                fec_type: FecType::Ldpc,
                bandwidth_mhz: 80.0,
                spreading_factor: None,
            })
            .collect();
        McsTable::new("wifi6_80mhz", entries).expect("static table is non-empty")
    }

    /// Narrowband, spread-spectrum table in the style of a LoRa-class radio:
    /// low order modulation, heavy spreading, wide dynamic SNR range.
    pub fn narrowband_spread() -> McsTable {
        let rows = [
            (0, Modulation::Bpsk, 0.25, -20.0, 4096.0),
            (1, Modulation::Bpsk, 0.5, -15.0, 1024.0),
            (2, Modulation::Qpsk, 0.5, -10.0, 256.0),
            (3, Modulation::Qpsk, 0.75, -5.0, 64.0),
            (4, Modulation::Qam16, 0.5, 0.0, 16.0),
        ];
        let entries = rows
            .into_iter()
            .map(|(index, modulation, code_rate, min_snr_db, sf)| McsEntry {
                index,
                modulation,
                code_rate,
                min_snr_db,
                fec_type: FecType::Turbo,
                bandwidth_mhz: 0.5,
                spreading_factor: Some(sf),
            })
            .collect();
        McsTable::new("narrowband_spread", entries).expect("static table is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::presets::*;

    #[test]
    fn candidate_falls_back_to_lowest_below_all_thresholds() {
        let table = wifi6_80mhz();
        let candidate = table.candidate_for(-100.0);
        assert_eq!(candidate.index, table.lowest().index);
    }

    #[test]
    fn candidate_picks_highest_qualifying_entry() {
        let table = wifi6_80mhz();
        let candidate = table.candidate_for(22.0);
        assert_eq!(candidate.index, 7); // min_snr_db 21.0 is highest <= 22.0
    }

    #[test]
    fn table_is_sorted_ascending() {
        let table = wifi6_80mhz();
        let snrs: Vec<f64> = table.entries().iter().map(|e| e.min_snr_db).collect();
        let mut sorted = snrs.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(snrs, sorted);
    }
}
