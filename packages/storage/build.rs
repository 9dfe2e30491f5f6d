// ABOUTME: Build script for the storage package
// ABOUTME: Rebuilds when migrations change, since they are embedded with sqlx::migrate!

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
