//! Fixture data files for integration tests.

use std::path::Path;

/// Write the standard fixture data set into `dir`:
/// two international organizations, two California CSV rows, one Texas
/// pipe-delimited row, and a code-less file that must be ignored.
pub fn write_fixture_data(dir: &Path) {
    write(
        dir,
        "international_nonprofits.csv",
        "Organization Name,URL,Country\n\
         Global Water Partners,https://gwp.org,Kenya\n\
         Hope Across Borders,https://hab.org,Peru\n",
    );
    write(
        dir,
        "nonprofits_CA.csv",
        "EIN,Organization Name,City,State,Country,PC,URL\n\
         941111111,Bay Area Food Bank,Oakland,CA,United States,PC,https://bafb.org\n\
         942222222,Coastal Water Trust,Monterey,CA,United States,PC,\n",
    );
    write(dir, "nonprofits_TX.txt", "751111111|Lone Star Food Pantry|Austin|TX|United States|PC\n");
    write(dir, "nonprofits_.csv", "Organization Name\nGhost Food Org\n");
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write fixture file");
}
