use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(folio_home: Option<PathBuf>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(folio_home) = folio_home {
        return Some(folio_home.join(".env"));
    }
    Some(home_dir?.join(".folio/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("FOLIO_HOME").map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::fallback_dotenv_path;
    use std::path::PathBuf;

    #[test]
    fn folio_home_wins_over_home_dir() {
        let got = fallback_dotenv_path(
            Some(PathBuf::from("/srv/site")),
            Some(PathBuf::from("/home/alice")),
        );
        assert_eq!(got, Some(PathBuf::from("/srv/site/.env")));
    }

    #[test]
    fn falls_back_to_dot_folio_under_home() {
        let got = fallback_dotenv_path(None, Some(PathBuf::from("/home/alice")));
        assert_eq!(got, Some(PathBuf::from("/home/alice/.folio/.env")));
    }

    #[test]
    fn no_home_means_no_fallback() {
        assert_eq!(fallback_dotenv_path(None, None), None);
    }
}
