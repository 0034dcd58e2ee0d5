/*
 * Firefly Flock
 *
 * A flock of fireflies drifting inside a cylinder. A few leaders wander
 * freely; every other firefly separates from, aligns with and coheres to
 * its neighbors, or chases the leader it has been assigned. Leadership is
 * reshuffled every few seconds.
 *
 * Set FIREFLIES_CONFIG to a JSON file to override the defaults and
 * RUST_LOG to change the log level.
 */

use env_logger::Env;

use fireflies::app;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
