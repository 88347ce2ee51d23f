use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of allowed CORS origins, `*` allows any
    #[clap(env, long, default_value = "*")]
    pub origin_urls: String,

    #[clap(env, long, hide_env_values = true)]
    pub google_api_key: Option<String>,

    #[clap(env, long, default_value = "https://places.googleapis.com/v1")]
    pub places_base_url: String,

    /// Used when the client leaves out `distance`
    #[clap(env, long, default_value_t = 1000.0)]
    pub default_radius_meters: f64,

    #[clap(env, long, default_value_t = 10)]
    pub max_result_count: u32,

    #[clap(env, long, default_value_t = 400)]
    pub photo_max_width_px: u32,

    /// Photo lookups in flight per search
    #[clap(env, long, default_value_t = 4)]
    pub photo_concurrency: usize,

    #[clap(env, long, default_value_t = 10)]
    pub provider_timeout_secs: u64,

    /// 0 disables the details cache
    #[clap(env, long, default_value_t = 0)]
    pub details_cache_ttl_secs: u64,

    /// Most place ids the details cache holds at once
    #[clap(env, long, default_value_t = 256)]
    pub details_cache_capacity: usize,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// The configured key, treating a blank value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
