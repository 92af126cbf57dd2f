use std::fmt;

/// Contadores acumulados pelo tratador de fault durante a execução.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Stats {
    pub page_faults: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    /// Faults resolvidos com um frame livre.
    pub installs: u64,
    /// Faults que só subiram uma página residente para leitura/escrita.
    pub upgrades: u64,
    /// Faults que substituíram uma vítima.
    pub evictions: u64,
}

impl Stats {
    /// Uma linha CSV: `policy,program,npages,nframes,reads,writes,faults`.
    pub fn csv_line(&self, policy: &str, program: &str, npages: usize, nframes: usize) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            policy, program, npages, nframes, self.disk_reads, self.disk_writes, self.page_faults
        )
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=======================")?;
        writeln!(f, "Program completed with:")?;
        writeln!(f, "{} Page Faults", self.page_faults)?;
        writeln!(f, "{} Disk Reads", self.disk_reads)?;
        write!(f, "{} Disk Writes", self.disk_writes)
    }
}
