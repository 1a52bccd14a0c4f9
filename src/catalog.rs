//! Well-known configuration files and the categories they are filed under.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Description of a well-known configuration file or directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFileInfo {
    /// Path relative to the home directory, as stored in the table
    pub path: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

const fn entry(
    path: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
) -> ConfigFileInfo {
    ConfigFileInfo {
        path,
        name,
        description,
        category,
    }
}

const KNOWN_FILES: &[ConfigFileInfo] = &[
    // Shell
    entry(".zshrc", "Zsh Config", "Configuration for the Z shell", "Shell"),
    entry(".bashrc", "Bash Config", "Configuration for Bash shell", "Shell"),
    entry(".profile", "Shell Profile", "Environment variables and shell startup commands", "Shell"),
    entry(".aliases", "Shell Aliases", "Custom command aliases for shell", "Shell"),
    entry(".functions", "Shell Functions", "Custom shell functions", "Shell"),
    entry(".config/starship.toml", "Starship Config", "Configuration for the Starship prompt", "Shell"),
    entry(".p10k.zsh", "Powerlevel10k Config", "Configuration for the Powerlevel10k prompt", "Shell"),
    entry(".zsh", "Zsh Directory", "Directory containing Zsh plugins and settings", "Shell"),
    entry(".oh-my-zsh", "Oh-My-Zsh", "Oh-My-Zsh configuration and plugins", "Shell"),
    // Terminal
    entry(".tmux.conf", "Tmux Config", "Configuration for the Tmux terminal multiplexer", "Terminal"),
    entry(".alacritty.yml", "Alacritty Config", "Configuration for the Alacritty terminal emulator", "Terminal"),
    entry(".kitty.conf", "Kitty Config", "Configuration for the Kitty terminal emulator", "Terminal"),
    entry(".terminfo", "Terminal Info", "Terminal capability database", "Terminal"),
    entry(".screenrc", "Screen Config", "Configuration for GNU Screen", "Terminal"),
    entry(".hyper.js", "Hyper Config", "Configuration for the Hyper terminal", "Terminal"),
    entry(".wezterm.lua", "WezTerm Config", "Configuration for the WezTerm terminal", "Terminal"),
    entry(".tmuxp", "Tmuxp Sessions", "Tmux session manager configurations", "Terminal"),
    // Editors
    entry(".vimrc", "Vim Config", "Configuration for Vim editor", "Editor"),
    entry(".vim", "Vim Directory", "Directory containing Vim plugins and settings", "Editor"),
    entry(".emacs", "Emacs Config", "Configuration for Emacs editor", "Editor"),
    entry(".emacs.d", "Emacs Directory", "Directory containing Emacs packages and settings", "Editor"),
    entry(".spacemacs", "Spacemacs Config", "Configuration for Spacemacs", "Editor"),
    entry(".ideavimrc", "IdeaVim Config", "Vim emulation for IntelliJ IDEA", "Editor"),
    entry(".nanorc", "Nano Config", "Configuration for the Nano editor", "Editor"),
    entry(".config/nvim", "Neovim Config", "Configuration for Neovim", "Editor"),
    // Version control
    entry(".gitconfig", "Git Config", "Global Git configuration", "Version Control"),
    entry(".gitignore", "Git Ignore", "Global Git ignore patterns", "Version Control"),
    entry(".gitattributes", "Git Attributes", "Attributes for Git repositories", "Version Control"),
    entry(".hgrc", "Mercurial Config", "Configuration for Mercurial", "Version Control"),
    // Window managers
    entry(".xinitrc", "X Init", "X Window System initialization", "Window Manager"),
    entry(".Xresources", "X Resources", "X Window System resources", "Window Manager"),
    entry(".i3", "i3 Config", "Configuration for the i3 window manager", "Window Manager"),
    entry(".config/i3", "i3 Config Directory", "Directory containing i3 window manager configuration", "Window Manager"),
    entry(".xmonad", "XMonad Config", "Configuration for the XMonad window manager", "Window Manager"),
    entry(".dwm", "DWM Config", "Configuration for the Dynamic Window Manager", "Window Manager"),
    entry(".awesomewm", "AwesomeWM Config", "Configuration for the Awesome window manager", "Window Manager"),
    entry(".config/sway", "Sway Config", "Configuration for the Sway window manager", "Window Manager"),
    // Desktop
    entry(".config/gtk-3.0", "GTK3 Config", "GTK3 configuration", "Desktop"),
    entry(".gtkrc-2.0", "GTK2 Config", "GTK2 configuration", "Desktop"),
    entry(".config/picom", "Picom Config", "Configuration for the Picom compositor", "Desktop"),
    entry(".config/compton.conf", "Compton Config", "Configuration for the Compton compositor", "Desktop"),
    entry(".config/rofi", "Rofi Config", "Configuration for the Rofi application launcher", "Desktop"),
    entry(".config/polybar", "Polybar Config", "Configuration for the Polybar status bar", "Desktop"),
    entry(".config/dunst", "Dunst Config", "Configuration for the Dunst notification daemon", "Desktop"),
    // Development
    entry(".npmrc", "NPM Config", "Configuration for NPM", "Development"),
    entry(".yarnrc", "Yarn Config", "Configuration for Yarn", "Development"),
    entry(".cargo/config", "Cargo Config", "Configuration for Rust's Cargo", "Development"),
    entry(".pip/pip.conf", "Pip Config", "Configuration for Python's Pip", "Development"),
    entry(".pylintrc", "Pylint Config", "Configuration for Python linting", "Development"),
    entry(".config/pycodestyle", "PEP8 Config", "Configuration for Python code style", "Development"),
    entry(".eslintrc", "ESLint Config", "Configuration for JavaScript/TypeScript linting", "Development"),
    entry(".prettierrc", "Prettier Config", "Configuration for code formatting", "Development"),
    entry(".editorconfig", "Editor Config", "Consistent coding styles across editors", "Development"),
    entry(".config/lazygit", "Lazygit Config", "Configuration for the Lazygit TUI", "Development"),
    // Security
    entry(".ssh/config", "SSH Config", "SSH client configuration", "Security"),
    entry(".gnupg", "GnuPG Directory", "GnuPG keys and configuration", "Security"),
    // Communication
    entry(".mutt", "Mutt Config", "Configuration for the Mutt email client", "Communication"),
    entry(".muttrc", "Mutt Config File", "Configuration file for the Mutt email client", "Communication"),
    entry(".mbsyncrc", "mbsync Config", "Configuration for the mbsync mail syncing tool", "Communication"),
    // Media
    entry(".config/mpd", "MPD Config", "Configuration for the Music Player Daemon", "Media"),
    entry(".ncmpcpp", "ncmpcpp Config", "Configuration for the ncmpcpp music player", "Media"),
    entry(".config/mpv", "MPV Config", "Configuration for the MPV media player", "Media"),
    // Utilities
    entry(".config/ranger", "Ranger Config", "Configuration for the Ranger file manager", "Utilities"),
    entry(".config/lf", "LF Config", "Configuration for the LF file manager", "Utilities"),
    entry(".config/bat", "Bat Config", "Configuration for the Bat command", "Utilities"),
    // Web
    entry(".config/qutebrowser", "Qutebrowser Config", "Configuration for the Qutebrowser", "Web"),
    // System
    entry(".config/systemd/user", "Systemd User Units", "User services for systemd", "System"),
    entry(".config", "Config Directory", "XDG config home directory", "System"),
    entry(".local/share", "Data Directory", "XDG data home directory", "System"),
    // macOS
    entry(".config/karabiner", "Karabiner Config", "Key remapping for macOS", "macOS"),
    entry(".skhdrc", "skhd Config", "Simple hotkey daemon for macOS", "macOS"),
    entry(".yabairc", "Yabai Config", "Window manager for macOS", "macOS"),
];

/// Category used when a file cannot be classified
pub const FALLBACK_CATEGORY: &str = "Misc";

/// Immutable lookup table keyed by home-relative path
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<&'static str, ConfigFileInfo>,
}

impl Catalog {
    /// Build a catalog over arbitrary entries
    pub fn from_entries(entries: impl IntoIterator<Item = ConfigFileInfo>) -> Self {
        Catalog {
            entries: entries.into_iter().map(|info| (info.path, info)).collect(),
        }
    }

    /// The built-in table of well-known dotfiles, built on first use
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog::from_entries(KNOWN_FILES.iter().copied()))
    }

    /// Exact, case-sensitive lookup of a home-relative path
    pub fn lookup(&self, relative_path: &str) -> Option<&ConfigFileInfo> {
        self.entries.get(relative_path)
    }

    /// Distinct category tags, sorted
    pub fn categories(&self) -> BTreeSet<&'static str> {
        self.entries.values().map(|info| info.category).collect()
    }

    /// Every entry filed under `category`, sorted by path
    pub fn files_in_category(&self, category: &str) -> Vec<ConfigFileInfo> {
        let mut files: Vec<_> = self
            .entries
            .values()
            .filter(|info| info.category == category)
            .copied()
            .collect();
        files.sort_by_key(|info| info.path);
        files
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
