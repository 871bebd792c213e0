use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gb_video_core::{DummyRenderer, GameModel, InterruptFlags, VideoCore, VideoHost, IO_REGISTERS_LEN};

struct BenchHost {
    io: [u8; IO_REGISTERS_LEN],
    cycles: i32,
}

impl VideoHost for BenchHost {
    fn model(&self) -> GameModel {
        GameModel::Dmg
    }
    fn io(&self) -> &[u8; IO_REGISTERS_LEN] {
        &self.io
    }
    fn io_mut(&mut self) -> &mut [u8; IO_REGISTERS_LEN] {
        &mut self.io
    }
    fn cpu_cycles(&self) -> i32 {
        self.cycles
    }
    fn double_speed(&self) -> u32 {
        0
    }
    fn at_instruction_boundary(&self) -> bool {
        true
    }
    fn cycles_until_next_fetch(&self) -> i32 {
        0
    }
    fn raise_interrupt(&mut self, _flag: InterruptFlags) {}
    fn update_irqs(&mut self) {}
    fn lower_next_event(&mut self, _cycles: i32) {}
    fn hdma_active(&self) -> bool {
        false
    }
    fn kick_hdma(&mut self) {}
}

fn process_events_benchmark(c: &mut Criterion) {
    let mut core = VideoCore::new(GameModel::Dmg, Box::new(DummyRenderer::new()));
    let mut host = BenchHost {
        io: [0; IO_REGISTERS_LEN],
        cycles: 0,
    };
    core.write_lcdc(&mut host, 0x91);

    c.bench_function("process_events 4 cycles", |b| {
        b.iter(|| {
            host.cycles += 4;
            black_box(core.process_events(&mut host, 4));
        })
    });
}

fn full_frame_benchmark(c: &mut Criterion) {
    let mut core = VideoCore::new(GameModel::Dmg, Box::new(DummyRenderer::new()));
    let mut host = BenchHost {
        io: [0; IO_REGISTERS_LEN],
        cycles: 0,
    };
    core.write_lcdc(&mut host, 0x91);

    c.bench_function("drive one full frame", |b| {
        b.iter(|| {
            let start = core.frame_counter();
            while core.frame_counter() == start {
                host.cycles += 4;
                black_box(core.process_events(&mut host, 4));
            }
        })
    });
}

criterion_group!(benches, process_events_benchmark, full_frame_benchmark);
criterion_main!(benches);
