use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the recipes CSV dataset
    #[serde(default = "default_recipes_csv_path")]
    pub recipes_csv_path: String,

    /// Number of K-Means clusters
    #[serde(default = "default_n_clusters")]
    pub n_clusters: usize,

    /// Seed for the K-Means initialisation RNG
    #[serde(default = "default_kmeans_seed")]
    pub kmeans_seed: u64,

    /// Number of K-Means restarts; the best inertia wins
    #[serde(default = "default_kmeans_runs")]
    pub kmeans_runs: usize,

    #[serde(default = "default_kmeans_max_iterations")]
    pub kmeans_max_iterations: u64,

    /// When false, recommendations are ranked on the base score alone
    #[serde(default = "default_clustering_enabled")]
    pub clustering_enabled: bool,

    /// Missing-ingredient limit used when a request does not provide one
    #[serde(default = "default_max_missing")]
    pub default_max_missing: usize,

    /// Result count used when a request does not provide one
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recipes_csv_path() -> String {
    "data/sample_recipes.csv".to_string()
}

fn default_n_clusters() -> usize {
    5
}

fn default_kmeans_seed() -> u64 {
    42
}

fn default_kmeans_runs() -> usize {
    10
}

fn default_kmeans_max_iterations() -> u64 {
    300
}

fn default_clustering_enabled() -> bool {
    true
}

fn default_max_missing() -> usize {
    2
}

fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            recipes_csv_path: default_recipes_csv_path(),
            n_clusters: default_n_clusters(),
            kmeans_seed: default_kmeans_seed(),
            kmeans_runs: default_kmeans_runs(),
            kmeans_max_iterations: default_kmeans_max_iterations(),
            clustering_enabled: default_clustering_enabled(),
            default_max_missing: default_max_missing(),
            default_top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that can never produce a usable model
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.n_clusters == 0 {
            anyhow::bail!("N_CLUSTERS must be at least 1");
        }
        if self.kmeans_runs == 0 {
            anyhow::bail!("KMEANS_RUNS must be at least 1");
        }
        if self.kmeans_max_iterations == 0 {
            anyhow::bail!("KMEANS_MAX_ITERATIONS must be at least 1");
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
