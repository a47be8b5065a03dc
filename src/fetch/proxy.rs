use rand::Rng;

/// Static egress pool. Selection is uniform over every proxy plus "no proxy".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyPool {
    proxies: Vec<String>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<String>) -> Self {
        Self { proxies }
    }

    /// Number of choices, counting the direct connection.
    pub fn options(&self) -> usize {
        self.proxies.len() + 1
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Picks one option; `None` means connect directly.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        let index = rng.gen_range(0..self.options());
        self.proxies.get(index).map(String::as_str)
    }
}
