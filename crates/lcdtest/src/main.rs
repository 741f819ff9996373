#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> miette::Result<()> {
	let (args, _guard) = lcdtest::args()?;
	lcdtest::run(args)
}
