use std::process::Command;

#[derive(Debug, Clone)]
pub struct GitInfo {
  pub version: String,
  pub path: String,
}

impl GitInfo {
  // resolves the git binary from PATH and reads its version
  pub fn discover() -> Result<Self, String> {
    Self::from_path("git")
  }

  // creates GitInfo from a specific git path
  pub fn from_path(git_path: &str) -> Result<Self, String> {
    let output = Command::new(git_path)
      .arg("version")
      .output()
      .map_err(|e| format!("Failed to run {git_path} version: {e}"))?;
    if !output.status.success() {
      return Err(format!("Failed to get git version: {}", String::from_utf8_lossy(&output.stderr)));
    }

    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(Self {
      version: raw.strip_prefix("git version ").unwrap_or(&raw).to_string(),
      path: git_path.to_string(),
    })
  }

  /// Parse version string into (major, minor) tuple for comparison
  pub fn parse_version(&self) -> Result<(u32, u32), String> {
    let mut parts = self.version.split('.');
    let major = parts
      .next()
      .and_then(|p| p.parse::<u32>().ok())
      .ok_or_else(|| format!("Invalid version format: {}", self.version))?;
    let minor = parts
      .next()
      .and_then(|p| p.parse::<u32>().ok())
      .ok_or_else(|| format!("Invalid version format: {}", self.version))?;

    Ok((major, minor))
  }

  /// Check if the installed Git meets the minimum requirement.
  /// The autosquash rebase path relies on behavior that is stable from 2.30 on.
  pub fn validate_minimum_version(&self) -> Result<(), String> {
    const MIN_MAJOR: u32 = 2;
    const MIN_MINOR: u32 = 30;

    let (major, minor) = self.parse_version()?;

    if major < MIN_MAJOR || (major == MIN_MAJOR && minor < MIN_MINOR) {
      Err(format!(
        "Git version {}.{} is too old. Fixup Deck requires Git {}.{} or newer. Please upgrade your Git installation.",
        major, minor, MIN_MAJOR, MIN_MINOR
      ))
    } else {
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn info(version: &str) -> GitInfo {
    GitInfo {
      version: version.to_string(),
      path: "git".to_string(),
    }
  }

  #[test]
  fn test_parse_version() {
    assert_eq!(info("2.39.5").parse_version().unwrap(), (2, 39));
    assert_eq!(info("2.50.0").parse_version().unwrap(), (2, 50));
  }

  #[test]
  fn test_parse_version_invalid() {
    assert!(info("nonsense").parse_version().is_err());
  }

  #[test]
  fn test_minimum_version_gate() {
    assert!(info("2.30.0").validate_minimum_version().is_ok());
    assert!(info("3.0.1").validate_minimum_version().is_ok());
    assert!(info("2.25.1").validate_minimum_version().is_err());
    assert!(info("1.9.0").validate_minimum_version().is_err());
  }
}
