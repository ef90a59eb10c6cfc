fn main() -> color_eyre::Result<()> {
    verstamp_build_info::initialize()
}
