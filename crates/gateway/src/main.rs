use env_logger::Env;
use relay_gateway::server;

fn main() {
  dotenv::dotenv().ok();
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
  server::initiate_gateway().expect("Error while trying to instantiate gateway WS");
}
