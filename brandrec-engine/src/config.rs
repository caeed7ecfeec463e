use clap::Parser;

use crate::catalog::HttpCatalogConfig;
use crate::error::RecommendError;
use crate::features::PriceRangePolicy;
use crate::recommendation::ScoreWeights;

#[derive(Parser, Debug, Clone)]
#[command(
	name = "brandrec-engine",
	about = "Brand recommendation service scoring price, name and tag similarity"
)]
pub struct CliArgs {
	/// Base URL of the storefront backend serving /api/brands
	#[arg(long, env = "NEXTJS_URL")]
	pub upstream_url: Option<String>,

	/// Address to bind the HTTP server to
	#[arg(long, default_value = "0.0.0.0", env = "BRANDREC_HOST")]
	pub host: String,

	/// Port to bind the HTTP server to
	#[arg(long, default_value = "8000", env = "BRANDREC_PORT")]
	pub port: u16,

	/// Timeout in seconds for each call to the backend
	#[arg(long, default_value = "10", env = "BRANDREC_UPSTREAM_TIMEOUT")]
	pub upstream_timeout: u64,

	/// Weight of price similarity in the fused score
	#[arg(long, default_value = "0.3", env = "BRANDREC_PRICE_WEIGHT")]
	pub price_weight: f64,

	/// Weight of name similarity in the fused score
	#[arg(long, default_value = "0.3", env = "BRANDREC_NAME_WEIGHT")]
	pub name_weight: f64,

	/// Weight of tag similarity in the fused score
	#[arg(long, default_value = "0.4", env = "BRANDREC_TAG_WEIGHT")]
	pub tag_weight: f64,

	/// Multiplier applied to boosted brands after fusion
	#[arg(long, default_value = "1.5", env = "BRANDREC_BOOST")]
	pub boost: f64,

	/// Which prices span the price-similarity range
	#[arg(long, value_enum, default_value = "include-target", env = "BRANDREC_PRICE_RANGE")]
	pub price_range: PriceRangePolicy,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info", env = "BRANDREC_LOG_LEVEL")]
	pub log_level: String,
}

/// Immutable service settings, built once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
	pub bind_addr: String,
	/// `None` when no backend URL was given; requests then fail with
	/// a configuration error instead of the process refusing to start.
	pub upstream: Option<HttpCatalogConfig>,
	pub weights: ScoreWeights,
	pub price_range: PriceRangePolicy,
}

impl EngineConfig {
	pub fn from_args(args: &CliArgs) -> Result<Self, RecommendError> {
		let weights = ScoreWeights {
			price: args.price_weight,
			name: args.name_weight,
			tag: args.tag_weight,
			boost: args.boost,
		};
		weights.validate()?;

		if args.upstream_timeout == 0 {
			return Err(RecommendError::InvalidConfig(
				"upstream timeout must be at least one second".into(),
			));
		}

		let upstream = args
			.upstream_url
			.as_deref()
			.map(str::trim)
			.filter(|url| !url.is_empty())
			.map(|url| HttpCatalogConfig {
				base_url: url.to_string(),
				timeout_secs: args.upstream_timeout,
			});

		Ok(Self {
			bind_addr: format!("{}:{}", args.host, args.port),
			upstream,
			weights,
			price_range: args.price_range,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	fn parse(extra: &[&str]) -> CliArgs {
		let mut argv = vec!["brandrec-engine"];
		argv.extend_from_slice(extra);
		CliArgs::parse_from(argv)
	}

	/// Default value clap falls back to when neither the flag nor its env
	/// variable is set. Read from the command definition so the result does
	/// not depend on the test process environment.
	fn declared_default(id: &str) -> String {
		let command = CliArgs::command();
		let arg = command
			.get_arguments()
			.find(|a| a.get_id() == id)
			.unwrap_or_else(|| panic!("no argument {id}"));
		arg.get_default_values()[0].to_string_lossy().into_owned()
	}

	#[test]
	fn declared_defaults_reproduce_fixed_weights() {
		let weights = ScoreWeights::default();
		assert_eq!(declared_default("price_weight").parse::<f64>().unwrap(), weights.price);
		assert_eq!(declared_default("name_weight").parse::<f64>().unwrap(), weights.name);
		assert_eq!(declared_default("tag_weight").parse::<f64>().unwrap(), weights.tag);
		assert_eq!(declared_default("boost").parse::<f64>().unwrap(), weights.boost);
		assert_eq!(declared_default("price_range"), "include-target");
		assert_eq!(declared_default("host"), "0.0.0.0");
		assert_eq!(declared_default("port"), "8000");
		assert_eq!(declared_default("upstream_timeout"), "10");
	}

	#[test]
	fn explicit_flags_build_config() {
		let args = parse(&[
			"--upstream-url",
			"http://backend:3000",
			"--host",
			"0.0.0.0",
			"--port",
			"8000",
			"--upstream-timeout",
			"10",
			"--price-weight",
			"0.3",
			"--name-weight",
			"0.3",
			"--tag-weight",
			"0.4",
			"--boost",
			"1.5",
			"--price-range",
			"include-target",
		]);
		let config = EngineConfig::from_args(&args).unwrap();
		assert_eq!(config.weights, ScoreWeights::default());
		assert_eq!(config.price_range, PriceRangePolicy::IncludeTarget);
		assert_eq!(config.bind_addr, "0.0.0.0:8000");
		let upstream = config.upstream.unwrap();
		assert_eq!(upstream.base_url, "http://backend:3000");
		assert_eq!(upstream.timeout_secs, 10);
	}

	#[test]
	fn blank_upstream_url_counts_as_unset() {
		let args = parse(&["--upstream-url", "  "]);
		let config = EngineConfig::from_args(&args).unwrap();
		assert!(config.upstream.is_none());
	}

	#[test]
	fn price_range_flag_parses() {
		let args = parse(&["--price-range", "candidates-only"]);
		assert_eq!(args.price_range, PriceRangePolicy::CandidatesOnly);
	}

	#[test]
	fn negative_weight_is_rejected() {
		let args = parse(&["--tag-weight=-1"]);
		assert!(matches!(
			EngineConfig::from_args(&args),
			Err(RecommendError::InvalidConfig(_))
		));
	}

	#[test]
	fn zero_timeout_is_rejected() {
		let args = parse(&["--upstream-timeout", "0"]);
		assert!(EngineConfig::from_args(&args).is_err());
	}
}
