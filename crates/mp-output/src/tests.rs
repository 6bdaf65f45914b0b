//! Integration tests for mp-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{CarrierPoseRow, PassengerPoseRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn carrier_row(carrier_id: u32, tick: u64) -> CarrierPoseRow {
        CarrierPoseRow {
            tick,
            carrier_id,
            kind:       "platform",
            map:        1,
            x:          10.5,
            y:          -2.0,
            z:          0.0,
            heading:    1.5,
            passengers: 3,
        }
    }

    fn passenger_row(entity_id: u32, seat: Option<u8>) -> PassengerPoseRow {
        PassengerPoseRow {
            tick: 4,
            entity_id,
            kind: "player",
            carrier_id: 0,
            seat,
            map: 1,
            x: 1.0,
            y: 2.0,
            z: 3.0,
            heading: 0.0,
            local_x: 1.0,
            local_y: 0.0,
            local_z: 1.0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("carrier_poses.csv").exists());
        assert!(dir.path().join("passenger_poses.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "carrier_poses.csv"),
            ["tick", "carrier_id", "kind", "map", "x", "y", "z", "heading", "passengers"]
        );
        assert_eq!(headers(&dir, "passenger_poses.csv")[..5], ["tick", "entity_id", "kind", "carrier_id", "seat"]);
        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            ["tick", "elapsed_ms", "platforms_moved", "teleports", "region_flips", "boarded", "swept"]
        );
    }

    #[test]
    fn carrier_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_carrier_poses(&[carrier_row(0, 5), carrier_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "carrier_poses.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");        // tick
        assert_eq!(&rows[1][1], "1");        // carrier_id
        assert_eq!(&rows[0][2], "platform");
        assert_eq!(&rows[0][4], "10.5");     // x
        assert_eq!(&rows[0][8], "3");        // passengers
    }

    #[test]
    fn platform_passengers_have_empty_seat() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_passenger_poses(&[passenger_row(7, None), passenger_row(8, Some(2))]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "passenger_poses.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[1][4], "2");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow {
            tick:            8,
            elapsed_ms:      9_000,
            platforms_moved: 1,
            teleports:       1,
            region_flips:    0,
            boarded:         2,
            swept:           0,
        };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "9000");
        assert_eq!(&rows[0][3], "1"); // teleports
        assert_eq!(&rows[0][5], "2"); // boarded
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }
}

// ── TraceObserver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use mp_behavior::{AlwaysActive, NoopBehavior, NoopMovement};
    use mp_carrier::{SeatDefinition, StaticSpawn};
    use mp_core::{MapId, Pose, Position, WorldConfig};
    use mp_entity::{EntityKind, EntitySpawn};
    use mp_path::{MotionProfile, PathNode, PathTemplate};
    use mp_sim::{WorldBuilder, WorldObserver};

    use crate::{
        CarrierPoseRow, CsvWriter, OutputError, OutputResult, OutputWriter, PassengerPoseRow,
        TickSummaryRow, TraceObserver,
    };

    /// Writer whose summary writes always fail.
    #[derive(Default)]
    struct Broken {
        summaries_tried: usize,
        finished:        bool,
    }

    impl OutputWriter for Broken {
        fn write_carrier_poses(&mut self, _rows: &[CarrierPoseRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_passenger_poses(&mut self, _rows: &[PassengerPoseRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries_tried += 1;
            Err(io::Error::other(format!("disk full at tick {}", row.tick)).into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn config() -> WorldConfig {
        WorldConfig {
            tick_ms:               1_000,
            total_ticks:           6,
            output_interval_ticks: 2,
            ..WorldConfig::default()
        }
    }

    fn shuttle() -> PathTemplate {
        PathTemplate::new(
            1,
            vec![
                PathNode::stop(MapId(1), Position::new(0.0, 0.0, 0.0), 2_000),
                PathNode::stop(MapId(1), Position::new(40.0, 0.0, 0.0), 2_000),
            ],
            MotionProfile::new(10.0, 10.0),
        )
    }

    #[test]
    fn integration_csv() {
        let dir = tempfile::tempdir().unwrap();
        let statics = vec![StaticSpawn {
            map:   MapId(1),
            kind:  EntityKind::GameObject,
            local: Pose::new(0.0, 1.0, 0.0, 0.0),
        }];
        let mut world = WorldBuilder::new(config(), NoopBehavior, AlwaysActive, NoopMovement)
            .platform(shuttle(), statics)
            .build()
            .unwrap();
        let walker = world.spawn(EntitySpawn::player(MapId(1), Pose::new(1.0, 0.0, 0.0, 0.0)));
        world.board_platform(mp_core::CarrierId(0), walker).unwrap();
        let host = world.spawn(EntitySpawn::creature(MapId(1), Pose::new(90.0, 0.0, 0.0, 0.0)));
        world
            .install_mount(host, vec![SeatDefinition::passenger(Pose::new(0.0, 0.0, 1.0, 0.0))], &[])
            .unwrap();

        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap());
        world.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("carrier_poses.csv")).unwrap();
        let carriers: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // Snapshots at ticks 0, 2, 4; one platform and one mount each.
        assert_eq!(carriers.len(), 6);
        assert_eq!(&carriers[0][2], "platform");
        assert_eq!(&carriers[1][2], "mount");

        let mut rdr = csv::Reader::from_path(dir.path().join("passenger_poses.csv")).unwrap();
        let passengers: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // The walker and the static object, three times.
        assert_eq!(passengers.len(), 6);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = TraceObserver::new(Broken::default());
        let mut world = WorldBuilder::new(config(), NoopBehavior, AlwaysActive, NoopMovement)
            .build()
            .unwrap();
        world.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(matches!(err, OutputError::Io(_)));
        assert!(err.to_string().contains("tick 0"));
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.summaries_tried, 6);
        assert!(writer.finished);
    }

    #[test]
    fn empty_snapshots_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap());
        let world = WorldBuilder::new(config(), NoopBehavior, AlwaysActive, NoopMovement)
            .build()
            .unwrap();
        obs.on_snapshot(mp_core::Tick(0), &world.carriers, &world.entities);
        obs.on_world_end(mp_core::Tick(0));
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("carrier_poses.csv")).unwrap();
        assert_eq!(rdr.records().count(), 0);
    }
}
