pub mod dir_template_repository;
pub mod paths;
pub mod pattern_file;
pub mod storage;
pub mod toml_config_repository;

pub use dir_template_repository::DirTemplateRepository;
pub use paths::CounselPaths;
pub use pattern_file::PatternFile;
pub use toml_config_repository::TomlConfigRepository;
