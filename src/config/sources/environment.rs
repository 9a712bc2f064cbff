//! Environment source: EVIDAG_<SECTION>__<KEY>, e.g. EVIDAG_FOLD__INDEX_WIDTH=4

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("EVIDAG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
