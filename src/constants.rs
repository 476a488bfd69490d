//! Common constants used throughout stackgen.

/// Suffix marking a file as a Handlebars template.
pub const TEMPLATE_SUFFIX: &str = ".hbs";

/// Placeholder prefix for files written as dotfiles (`_gitignore` becomes `.gitignore`).
pub const DOTFILE_PREFIX: char = '_';

/// Names that are turned into dotfiles when they carry [`DOTFILE_PREFIX`].
pub const RESERVED_DOTFILES: [&str; 6] =
    ["gitignore", "npmrc", "env", "env.example", "dockerignore", "prettierignore"];

/// Extensions that are always copied byte for byte.
pub const BINARY_EXTENSIONS: [&str; 24] = [
    "png", "jpg", "jpeg", "gif", "webp", "ico", "bmp", "avif", "icns", "woff", "woff2", "ttf",
    "otf", "eot", "zip", "gz", "tgz", "tar", "7z", "pdf", "mp3", "mp4", "wasm", "db",
];

/// Files that are never materialized.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/.DS_Store", "**/Thumbs.db", "**/.git/**"];

/// Glob used when materializing a whole template directory.
pub const DEFAULT_GLOB: &str = "**/*";

/// Port the generated server listens on unless a plugin overrides it.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Port of the generated web frontend.
pub const DEFAULT_WEB_PORT: u16 = 3001;

/// Supported project configuration file names.
pub const CONFIG_FILES: [&str; 3] = ["stackgen.json", "stackgen.yml", "stackgen.yaml"];
